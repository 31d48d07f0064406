//! Bodies for the `/functions/v1/*` generation endpoints.
//!
//! Required text fields default to empty so that a missing field reaches
//! input validation and gets its specific message.

use serde::{Deserialize, Serialize};

use replysmith_core::domain::{Platform, Tone};
use replysmith_core::prompts::{
    AnalysisFields, AnalysisSuggestionFields, CommentFields, CommentSuggestionFields,
    ConversationalFields, ImproveAnalysisFields,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
}

impl AnalysisRequest {
    pub fn fields(&self) -> AnalysisFields<'_> {
        AnalysisFields {
            post: &self.post,
            platform: self.platform,
            tone: self.tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
}

impl CommentRequest {
    pub fn fields(&self) -> CommentFields<'_> {
        CommentFields {
            analysis: &self.analysis,
            platform: self.platform,
            tone: self.tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationalCommentRequest {
    #[serde(default)]
    pub original_comment: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

impl ConversationalCommentRequest {
    /// Blank custom instructions count as absent.
    pub fn fields(&self) -> ConversationalFields<'_> {
        ConversationalFields {
            original_comment: &self.original_comment,
            platform: self.platform,
            tone: self.tone,
            custom_instructions: self
                .custom_instructions
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Body of `/functions/v1/generate-suggestions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
}

impl SuggestionsRequest {
    pub fn fields(&self) -> CommentSuggestionFields<'_> {
        CommentSuggestionFields {
            comment: &self.comment,
            platform: self.platform,
            tone: self.tone,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSuggestionsRequest {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
}

impl AnalysisSuggestionsRequest {
    pub fn fields(&self) -> AnalysisSuggestionFields<'_> {
        AnalysisSuggestionFields {
            analysis: &self.analysis,
            platform: self.platform,
            tone: self.tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveAnalysisRequest {
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub current_analysis: String,
    #[serde(default)]
    pub improvement_instructions: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
}

impl ImproveAnalysisRequest {
    pub fn fields(&self) -> ImproveAnalysisFields<'_> {
        ImproveAnalysisFields {
            post: &self.post,
            current_analysis: &self.current_analysis,
            improvement_instructions: &self.improvement_instructions,
            platform: self.platform,
            tone: self.tone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversational_request_reads_camel_case() {
        let req: ConversationalCommentRequest = serde_json::from_str(
            r#"{"originalComment":"hi","platform":"linkedin","tone":"professional","customInstructions":"short"}"#,
        )
        .unwrap();

        let fields = req.fields();
        assert_eq!(fields.original_comment, "hi");
        assert_eq!(fields.platform, Platform::Linkedin);
        assert_eq!(fields.tone, Tone::Professional);
        assert_eq!(fields.custom_instructions, Some("short"));
    }

    #[test]
    fn test_blank_custom_instructions_are_dropped() {
        let req = ConversationalCommentRequest {
            original_comment: "hi".into(),
            custom_instructions: Some("   ".into()),
            ..Default::default()
        };

        assert_eq!(req.fields().custom_instructions, None);
    }

    #[test]
    fn test_missing_fields_default() {
        let req: AnalysisRequest = serde_json::from_str("{}").unwrap();

        assert!(req.post.is_empty());
        assert_eq!(req.platform, Platform::Reddit);
        assert_eq!(req.tone, Tone::Casual);
    }

    #[test]
    fn test_improve_request_field_names() {
        let json = serde_json::to_value(ImproveAnalysisRequest {
            post: "p".into(),
            current_analysis: "a".into(),
            improvement_instructions: "i".into(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(json["currentAnalysis"], "a");
        assert_eq!(json["improvementInstructions"], "i");
        assert_eq!(json["platform"], "reddit");
    }
}
