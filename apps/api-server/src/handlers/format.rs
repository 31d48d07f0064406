//! Analysis formatting endpoint.
//!
//! Exposes the segmenter so thin clients can render sections without
//! reimplementing it.

use actix_web::{HttpResponse, web};

use replysmith_core::format::{clean_analysis_text, segment_analysis};
use replysmith_shared::dto::{FormatAnalysisRequest, FormatAnalysisResponse};

/// POST /api/format/analysis
pub async fn format_analysis(body: web::Json<FormatAnalysisRequest>) -> HttpResponse {
    let raw = &body.analysis;

    HttpResponse::Ok().json(FormatAnalysisResponse {
        cleaned: clean_analysis_text(raw),
        sections: segment_analysis(raw),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::test_support::{ScriptedCompletion, TestApp};

    #[actix_web::test]
    async fn test_format_splits_numbered_sections() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/format/analysis")
            .set_json(json!({
                "analysis": "1. Core problem: deadlines keep slipping\n2. Emotional state: frustrated and tired\n3. Help needed: a way to push back"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body: Value = test::read_body_json(res).await;
        let sections = body["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0]["icon"], "problem");
        assert_eq!(sections[1]["icon"], "emotion");
        assert_eq!(sections[2]["icon"], "help");
    }

    #[actix_web::test]
    async fn test_format_blank_analysis_is_one_overview_section() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/format/analysis")
            .set_json(json!({ "analysis": "   " }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let sections = body["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0]["title"], "Analysis Overview");
        assert_eq!(body["cleaned"], "");
    }
}
