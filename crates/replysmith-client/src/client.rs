//! HTTP client for the generation endpoints.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use replysmith_core::domain::{Platform, Tone};
use replysmith_core::suggestions::{FallbackSet, SUGGESTION_COUNT};
use replysmith_shared::ErrorResponse;
use replysmith_shared::dto::{
    AnalysisRequest, AnalysisResponse, AnalysisSuggestionsRequest, CommentRequest,
    CommentResponse, ConversationalCommentRequest, ImproveAnalysisRequest, SuggestionsRequest,
    SuggestionsResponse,
};

use crate::error::ClientError;

/// One generation endpoint: its path and the message used when a failed
/// response carries no `error` field.
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Analysis,
    Comment,
    ConversationalComment,
    GenerateSuggestions,
    AnalysisSuggestions,
    ImproveAnalysis,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Analysis => "functions/v1/analysis",
            Endpoint::Comment => "functions/v1/comment",
            Endpoint::ConversationalComment => "functions/v1/conversational-comment",
            Endpoint::GenerateSuggestions => "functions/v1/generate-suggestions",
            Endpoint::AnalysisSuggestions => "functions/v1/analysis-suggestions",
            Endpoint::ImproveAnalysis => "functions/v1/improve-analysis",
        }
    }

    fn generic_failure(self) -> &'static str {
        match self {
            Endpoint::Analysis => "Failed to analyze post",
            Endpoint::Comment => "Failed to generate comment",
            Endpoint::ConversationalComment => "Failed to generate conversational comment",
            Endpoint::GenerateSuggestions => "Failed to generate suggestions",
            Endpoint::AnalysisSuggestions => "Failed to generate analysis suggestions",
            Endpoint::ImproveAnalysis => "Failed to improve analysis",
        }
    }

    fn context(self) -> &'static str {
        match self {
            Endpoint::Analysis => "analysis",
            Endpoint::Comment => "comment",
            Endpoint::ConversationalComment => "conversational-comment",
            Endpoint::GenerateSuggestions => "generate-suggestions",
            Endpoint::AnalysisSuggestions => "analysis-suggestions",
            Endpoint::ImproveAnalysis => "improve-analysis",
        }
    }
}

/// Client for the Replysmith generation API.
///
/// Use [`ReplyClient::new`] with the server root (for example
/// `https://replysmith.example.com`) and the caller's access token.
#[derive(Clone)]
pub struct ReplyClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ReplyClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, token, Duration::from_secs(90))
    }

    pub fn with_timeout(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // A single trailing slash keeps `Url::join` appending instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Analyze a social media post.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if `post` is blank.
    /// - [`ClientError::UpgradeRequired`] for trial accounts.
    /// - [`ClientError::Api`] on any other non-2xx answer.
    /// - [`ClientError::Http`] on network failure.
    pub async fn analyze_post(
        &self,
        post: &str,
        platform: Platform,
        tone: Tone,
    ) -> Result<String, ClientError> {
        require(post, "Please paste a social media post first")?;
        let body = AnalysisRequest {
            post: post.to_owned(),
            platform,
            tone,
        };
        let response: AnalysisResponse = self.call(Endpoint::Analysis, &body).await?;
        Ok(response.analysis)
    }

    /// Write a comment from an analysis.
    pub async fn write_comment(
        &self,
        analysis: &str,
        platform: Platform,
        tone: Tone,
    ) -> Result<String, ClientError> {
        require(analysis, "Analysis is required")?;
        let body = CommentRequest {
            analysis: analysis.to_owned(),
            platform,
            tone,
        };
        let response: CommentResponse = self.call(Endpoint::Comment, &body).await?;
        Ok(response.comment)
    }

    /// Rewrite a comment in a more conversational voice.
    pub async fn make_conversational(
        &self,
        original_comment: &str,
        platform: Platform,
        tone: Tone,
        custom_instructions: Option<&str>,
    ) -> Result<String, ClientError> {
        require(original_comment, "Original comment is required")?;
        let body = ConversationalCommentRequest {
            original_comment: original_comment.to_owned(),
            platform,
            tone,
            custom_instructions: custom_instructions.map(str::to_owned),
        };
        let response: CommentResponse = self.call(Endpoint::ConversationalComment, &body).await?;
        Ok(response.comment)
    }

    /// Three suggestions for improving a comment.
    ///
    /// A 2xx answer that is not exactly three strings resolves with the
    /// fixed comment fallback set. Failed requests still error.
    pub async fn generate_suggestions(
        &self,
        comment: &str,
        platform: Platform,
        tone: Tone,
    ) -> Result<Vec<String>, ClientError> {
        require(comment, "Comment is required")?;
        let body = SuggestionsRequest {
            comment: comment.to_owned(),
            platform,
            tone,
        };
        self.suggestions(Endpoint::GenerateSuggestions, &body, FallbackSet::Comment)
            .await
    }

    /// Three suggestions for improving an analysis, with the same fallback
    /// rule as [`ReplyClient::generate_suggestions`].
    pub async fn analysis_suggestions(
        &self,
        analysis: &str,
        platform: Platform,
        tone: Tone,
    ) -> Result<Vec<String>, ClientError> {
        require(analysis, "Analysis is required")?;
        let body = AnalysisSuggestionsRequest {
            analysis: analysis.to_owned(),
            platform,
            tone,
        };
        self.suggestions(Endpoint::AnalysisSuggestions, &body, FallbackSet::AnalysisClient)
            .await
    }

    /// Regenerate an analysis following improvement instructions.
    pub async fn improve_analysis(
        &self,
        post: &str,
        current_analysis: &str,
        improvement_instructions: &str,
        platform: Platform,
        tone: Tone,
    ) -> Result<String, ClientError> {
        require(post, "Original post is required")?;
        require(current_analysis, "Current analysis is required")?;
        require(improvement_instructions, "Improvement instructions are required")?;
        let body = ImproveAnalysisRequest {
            post: post.to_owned(),
            current_analysis: current_analysis.to_owned(),
            improvement_instructions: improvement_instructions.to_owned(),
            platform,
            tone,
        };
        let response: AnalysisResponse = self.call(Endpoint::ImproveAnalysis, &body).await?;
        Ok(response.analysis)
    }

    async fn call<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(endpoint, body).await?;
        serde_json::from_str(&text).map_err(|source| ClientError::Decode {
            context: endpoint.context(),
            source,
        })
    }

    async fn suggestions<B>(
        &self,
        endpoint: Endpoint,
        body: &B,
        fallback: FallbackSet,
    ) -> Result<Vec<String>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let text = self.send(endpoint, body).await?;
        match serde_json::from_str::<SuggestionsResponse>(&text) {
            Ok(parsed) if parsed.suggestions.len() == SUGGESTION_COUNT => Ok(parsed.suggestions),
            _ => {
                tracing::warn!(endpoint = endpoint.context(), "Unusable suggestions payload, using fallback");
                Ok(fallback.suggestions())
            }
        }
    }

    /// POST the body and return the raw 2xx text.
    async fn send<B>(&self, endpoint: Endpoint, body: &B) -> Result<String, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(endpoint.path())
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;

        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::failure(endpoint, response).await);
        }

        Ok(response.text().await?)
    }

    async fn failure(endpoint: Endpoint, response: Response) -> ClientError {
        let status = response.status().as_u16();
        let parsed = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorResponse>(&text).ok())
            // The transport status is authoritative over whatever the body claims.
            .map(|body| ErrorResponse { status, ..body });

        let upgrade = parsed.as_ref().is_some_and(ErrorResponse::is_upgrade_required);
        let message = parsed
            .map(|body| body.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| endpoint.generic_failure().to_owned());

        tracing::debug!(endpoint = endpoint.context(), status, error = %message, "Generation request failed");

        if upgrade {
            ClientError::UpgradeRequired(message)
        } else {
            ClientError::Api { status, message }
        }
    }
}

fn require(value: &str, message: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(message.to_owned()));
    }
    Ok(())
}
