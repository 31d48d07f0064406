//! Generation service - validates input, renders the prompt, calls the model.

use std::sync::Arc;

use crate::error::DomainError;
use crate::ports::ChatCompletion;
use crate::prompts::{
    self, AnalysisFields, AnalysisSuggestionFields, CommentFields, CommentSuggestionFields,
    ConversationalFields, ImproveAnalysisFields, Prompt,
};
use crate::suggestions;

/// Stateless front door for every generation operation.
///
/// Blank required fields are rejected before the model is called. Model and
/// transport failures propagate unchanged; malformed suggestion replies do
/// not, they fall back to fixed suggestion sets.
#[derive(Clone)]
pub struct GenerationService {
    completion: Arc<dyn ChatCompletion>,
}

impl GenerationService {
    pub fn new(completion: Arc<dyn ChatCompletion>) -> Self {
        Self { completion }
    }

    pub async fn analyze_post(&self, fields: &AnalysisFields<'_>) -> Result<String, DomainError> {
        require(fields.post, "Please paste a social media post first")?;
        tracing::info!(platform = %fields.platform, tone = %fields.tone, "Analyzing post");
        self.run(prompts::analysis(fields)).await
    }

    pub async fn write_comment(&self, fields: &CommentFields<'_>) -> Result<String, DomainError> {
        require(fields.analysis, "Analysis is required")?;
        tracing::info!(platform = %fields.platform, tone = %fields.tone, "Writing comment");
        self.run(prompts::comment(fields)).await
    }

    pub async fn make_conversational(
        &self,
        fields: &ConversationalFields<'_>,
    ) -> Result<String, DomainError> {
        require(fields.original_comment, "Original comment is required")?;
        tracing::info!(
            platform = %fields.platform,
            tone = %fields.tone,
            custom_instructions = fields.custom_instructions.is_some(),
            "Generating conversational comment"
        );
        self.run(prompts::conversational_comment(fields)).await
    }

    pub async fn suggest_comment_improvements(
        &self,
        fields: &CommentSuggestionFields<'_>,
    ) -> Result<Vec<String>, DomainError> {
        require(fields.comment, "Comment is required")?;
        let reply = self.run(prompts::comment_suggestions(fields)).await?;
        Ok(suggestions::parse_comment_suggestions(&reply))
    }

    pub async fn suggest_analysis_improvements(
        &self,
        fields: &AnalysisSuggestionFields<'_>,
    ) -> Result<Vec<String>, DomainError> {
        require(fields.analysis, "Analysis is required")?;
        let reply = self.run(prompts::analysis_suggestions(fields)).await?;
        Ok(suggestions::parse_analysis_suggestions(&reply))
    }

    pub async fn improve_analysis(
        &self,
        fields: &ImproveAnalysisFields<'_>,
    ) -> Result<String, DomainError> {
        require(fields.post, "Original post is required")?;
        require(fields.current_analysis, "Current analysis is required")?;
        require(
            fields.improvement_instructions,
            "Improvement instructions are required",
        )?;
        tracing::info!(platform = %fields.platform, tone = %fields.tone, "Improving analysis");
        self.run(prompts::improve_analysis(fields)).await
    }

    async fn run(&self, prompt: Prompt) -> Result<String, DomainError> {
        let reply = self.completion.complete(&prompt).await?;
        tracing::debug!(chars = reply.len(), tier = ?prompt.tier, "Completion received");
        Ok(reply.trim().to_string())
    }
}

fn require(value: &str, message: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(message.to_string()));
    }
    Ok(())
}
