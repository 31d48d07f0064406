//! Generation endpoints under `/functions/v1`.
//!
//! Each handler authenticates, re-reads the caller's role through the role
//! gate, then hands the body to [`GenerationService`](replysmith_core::service::GenerationService).

use actix_web::{HttpResponse, web};

use replysmith_shared::dto::{
    AnalysisRequest, AnalysisResponse, AnalysisSuggestionsRequest, CommentRequest,
    CommentResponse, ConversationalCommentRequest, ImproveAnalysisRequest, SuggestionsRequest,
    SuggestionsResponse,
};

use crate::middleware::auth::{Identity, require_generation};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /functions/v1/analysis
pub async fn analysis(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<AnalysisRequest>,
) -> AppResult<HttpResponse> {
    require_generation(&state, &identity).await?;

    let analysis = state.generation.analyze_post(&body.fields()).await?;

    Ok(HttpResponse::Ok().json(AnalysisResponse { analysis }))
}

/// POST /functions/v1/comment
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    require_generation(&state, &identity).await?;

    let comment = state.generation.write_comment(&body.fields()).await?;

    Ok(HttpResponse::Ok().json(CommentResponse { comment }))
}

/// POST /functions/v1/conversational-comment
pub async fn conversational_comment(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ConversationalCommentRequest>,
) -> AppResult<HttpResponse> {
    require_generation(&state, &identity).await?;

    let comment = state.generation.make_conversational(&body.fields()).await?;

    Ok(HttpResponse::Ok().json(CommentResponse { comment }))
}

/// POST /functions/v1/generate-suggestions
pub async fn generate_suggestions(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<SuggestionsRequest>,
) -> AppResult<HttpResponse> {
    require_generation(&state, &identity).await?;

    let suggestions = state
        .generation
        .suggest_comment_improvements(&body.fields())
        .await?;

    Ok(HttpResponse::Ok().json(SuggestionsResponse { suggestions }))
}

/// POST /functions/v1/analysis-suggestions
pub async fn analysis_suggestions(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<AnalysisSuggestionsRequest>,
) -> AppResult<HttpResponse> {
    require_generation(&state, &identity).await?;

    let suggestions = state
        .generation
        .suggest_analysis_improvements(&body.fields())
        .await?;

    Ok(HttpResponse::Ok().json(SuggestionsResponse { suggestions }))
}

/// POST /functions/v1/improve-analysis
pub async fn improve_analysis(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ImproveAnalysisRequest>,
) -> AppResult<HttpResponse> {
    require_generation(&state, &identity).await?;

    let analysis = state.generation.improve_analysis(&body.fields()).await?;

    Ok(HttpResponse::Ok().json(AnalysisResponse { analysis }))
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use serde_json::{Value, json};

    use replysmith_core::domain::Role;
    use replysmith_core::ports::{BaseRepository, CompletionError};
    use replysmith_core::prompts::ModelTier;

    use crate::test_support::{ScriptedCompletion, TestApp, bearer};

    #[actix_web::test]
    async fn test_user_can_analyze() {
        let ctx = TestApp::new(ScriptedCompletion::replying("  1. Main Problem: burnout  "));
        let (_, token) = ctx.seed_user("user@example.com", Role::User).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/analysis")
            .insert_header(bearer(&token))
            .set_json(json!({ "post": "I'm exhausted", "platform": "reddit", "tone": "casual" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        assert_eq!(res.headers().get("access-control-allow-origin").unwrap(), "*");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["analysis"], "1. Main Problem: burnout");
        assert_eq!(ctx.completion.calls(), 1);
    }

    #[actix_web::test]
    async fn test_interested_role_gets_upgrade_required_without_model_call() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let (_, token) = ctx.seed_user("trial@example.com", Role::Interested).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/comment")
            .insert_header(bearer(&token))
            .set_json(json!({ "analysis": "1. x", "platform": "reddit", "tone": "casual" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 403);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "upgrade_required");
        assert!(body["error"].as_str().unwrap().contains("upgrade"));
        assert!(body["requestId"].is_string());
        assert_eq!(ctx.completion.calls(), 0);
    }

    #[actix_web::test]
    async fn test_role_is_read_from_store_not_token() {
        let ctx = TestApp::new(ScriptedCompletion::replying("ok"));
        let (mut user, token) = ctx.seed_user("demoted@example.com", Role::User).await;
        user.set_role(Role::Interested);
        ctx.state.users.save(user).await.unwrap();
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/analysis")
            .insert_header(bearer(&token))
            .set_json(json!({ "post": "hello" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 403);
    }

    #[actix_web::test]
    async fn test_blank_post_is_400_without_model_call() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let (_, token) = ctx.seed_user("admin@example.com", Role::Admin).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/analysis")
            .insert_header(bearer(&token))
            .set_json(json!({ "post": "   ", "platform": "reddit", "tone": "casual" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Please paste a social media post first");
        assert_eq!(ctx.completion.calls(), 0);
    }

    #[actix_web::test]
    async fn test_upstream_failure_is_502_with_message() {
        let ctx = TestApp::new(ScriptedCompletion::failing(CompletionError::Upstream(
            "Rate limit reached".into(),
        )));
        let (_, token) = ctx.seed_user("user@example.com", Role::User).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/improve-analysis")
            .insert_header(bearer(&token))
            .set_json(json!({
                "post": "p",
                "currentAnalysis": "a",
                "improvementInstructions": "more stats"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 502);
        let body: Value = test::read_body_json(res).await;
        assert!(body["error"].as_str().unwrap().contains("Rate limit reached"));
    }

    #[actix_web::test]
    async fn test_missing_token_is_401() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/analysis")
            .set_json(json!({ "post": "hello" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn test_suggestions_fall_back_on_prose_reply() {
        let ctx = TestApp::new(ScriptedCompletion::replying("Here are some ideas: be nicer"));
        let (_, token) = ctx.seed_user("user@example.com", Role::User).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/generate-suggestions")
            .insert_header(bearer(&token))
            .set_json(json!({ "comment": "Great post", "platform": "twitter", "tone": "friendly" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
        assert_eq!(body["suggestions"][0], "Add a personal example");
    }

    #[actix_web::test]
    async fn test_comment_uses_premium_tier() {
        let ctx = TestApp::new(ScriptedCompletion::replying("Been there."));
        let (_, token) = ctx.seed_user("user@example.com", Role::User).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/comment")
            .insert_header(bearer(&token))
            .set_json(json!({ "analysis": "1. Main Problem: x", "platform": "linkedin", "tone": "professional" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        assert_eq!(ctx.completion.last_prompt().unwrap().tier, ModelTier::Premium);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let (_, token) = ctx.seed_user("user@example.com", Role::User).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/functions/v1/analysis")
            .insert_header(bearer(&token))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }
}
