//! State of one post-to-comment flow.

use replysmith_core::domain::{Platform, Section, Tone};
use replysmith_core::format::segment_analysis;

use crate::client::ReplyClient;
use crate::error::ClientError;

/// Holds the inputs and results of one flow: post, audience, analysis,
/// comment, conversational rewrite and suggestions.
///
/// Every action commits its result only on success; on error the previous
/// state is left untouched. Replacing the analysis clears everything derived
/// from it.
pub struct ReplySession {
    client: ReplyClient,
    pub post: String,
    pub platform: Platform,
    pub tone: Tone,
    analysis: Option<String>,
    comment: Option<String>,
    conversational: Option<String>,
    comment_suggestions: Vec<String>,
    analysis_suggestions: Vec<String>,
}

impl ReplySession {
    pub fn new(client: ReplyClient) -> Self {
        Self {
            client,
            post: String::new(),
            platform: Platform::default(),
            tone: Tone::default(),
            analysis: None,
            comment: None,
            conversational: None,
            comment_suggestions: Vec::new(),
            analysis_suggestions: Vec::new(),
        }
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn conversational(&self) -> Option<&str> {
        self.conversational.as_deref()
    }

    pub fn comment_suggestions(&self) -> &[String] {
        &self.comment_suggestions
    }

    pub fn analysis_suggestions(&self) -> &[String] {
        &self.analysis_suggestions
    }

    /// Display sections of the current analysis.
    pub fn sections(&self) -> Vec<Section> {
        self.analysis
            .as_deref()
            .map(segment_analysis)
            .unwrap_or_default()
    }

    pub async fn analyze(&mut self) -> Result<&str, ClientError> {
        let analysis = self
            .client
            .analyze_post(&self.post, self.platform, self.tone)
            .await?;
        Ok(self.replace_analysis(analysis))
    }

    pub async fn write_comment(&mut self) -> Result<&str, ClientError> {
        let analysis = self.analysis.as_deref().unwrap_or_default();
        let comment = self
            .client
            .write_comment(analysis, self.platform, self.tone)
            .await?;

        self.conversational = None;
        self.comment_suggestions.clear();
        Ok(self.comment.insert(comment))
    }

    pub async fn make_conversational(
        &mut self,
        custom_instructions: Option<&str>,
    ) -> Result<&str, ClientError> {
        let comment = self.comment.as_deref().unwrap_or_default();
        let rewritten = self
            .client
            .make_conversational(comment, self.platform, self.tone, custom_instructions)
            .await?;
        Ok(self.conversational.insert(rewritten))
    }

    pub async fn load_comment_suggestions(&mut self) -> Result<&[String], ClientError> {
        let comment = self.comment.as_deref().unwrap_or_default();
        self.comment_suggestions = self
            .client
            .generate_suggestions(comment, self.platform, self.tone)
            .await?;
        Ok(&self.comment_suggestions)
    }

    pub async fn load_analysis_suggestions(&mut self) -> Result<&[String], ClientError> {
        let analysis = self.analysis.as_deref().unwrap_or_default();
        self.analysis_suggestions = self
            .client
            .analysis_suggestions(analysis, self.platform, self.tone)
            .await?;
        Ok(&self.analysis_suggestions)
    }

    pub async fn improve_analysis(&mut self, instructions: &str) -> Result<&str, ClientError> {
        let current = self.analysis.as_deref().unwrap_or_default();
        let improved = self
            .client
            .improve_analysis(&self.post, current, instructions, self.platform, self.tone)
            .await?;
        Ok(self.replace_analysis(improved))
    }

    fn replace_analysis(&mut self, analysis: String) -> &str {
        self.comment = None;
        self.conversational = None;
        self.comment_suggestions.clear();
        self.analysis_suggestions.clear();
        self.analysis.insert(analysis)
    }
}
