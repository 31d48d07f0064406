//! Prompt templates.
//!
//! Each generation operation has an input record and a pure builder that
//! turns it into a [`Prompt`]. Templates and sampling parameters are fixed
//! here and nowhere else.

use serde::{Deserialize, Serialize};

use crate::domain::{Platform, Tone};

/// Which configured model a prompt should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// The cheap default model.
    Standard,
    /// The stronger model used for the first comment draft.
    Premium,
}

/// A fully rendered chat request, minus the model name.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: Option<String>,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub tier: ModelTier,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisFields<'a> {
    pub post: &'a str,
    pub platform: Platform,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy)]
pub struct CommentFields<'a> {
    pub analysis: &'a str,
    pub platform: Platform,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy)]
pub struct ConversationalFields<'a> {
    pub original_comment: &'a str,
    pub platform: Platform,
    pub tone: Tone,
    pub custom_instructions: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct CommentSuggestionFields<'a> {
    pub comment: &'a str,
    pub platform: Platform,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisSuggestionFields<'a> {
    pub analysis: &'a str,
    pub platform: Platform,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy)]
pub struct ImproveAnalysisFields<'a> {
    pub post: &'a str,
    pub current_analysis: &'a str,
    pub improvement_instructions: &'a str,
    pub platform: Platform,
    pub tone: Tone,
}

const CONVERSATIONAL_PERSONA: &str = "You are an expert at transforming formal expert advice into conversational, story-driven content that feels natural and engaging. You maintain the core expertise while adding personality and relatability.";

const SUGGESTION_PERSONA: &str = "You are an expert at generating specific, actionable suggestions to improve social media comments. Always return valid JSON arrays with exactly 3 concise suggestions.";

const ANALYSIS_SUGGESTION_ASK: &str =
    "Generate 3 short improvement suggestions for this analysis.";

/// Six-part analysis of the original post.
pub fn analysis(fields: &AnalysisFields<'_>) -> Prompt {
    let AnalysisFields {
        post,
        platform,
        tone,
    } = fields;

    Prompt {
        system: None,
        user: format!(
            "You are my expert research assistant and ghostwriter. Analyze the social media post according to these exact requirements:

Provide your analysis in exactly 6 numbered sections. Use PLAIN TEXT only - no markdown, no asterisks, no special formatting:

1. Main Problem: What is the poster asking or struggling with?
2. Emotional State: What is their emotional state or underlying need?
3. Help Needed: What type of help do they need (e.g., mindset, steps, validation)?
4. Root Cause: What is the likely root cause of their issue?
5. Facts & Insights: Provide 1-2 relevant facts, stats, or insights from credible sources (within the last 2 years).
6. Comment Angle: Suggest an angle for the comment (e.g., relatable story, contrarian view, practical steps).

Platform: {platform}
Tone: {tone}
Post: {post}

Important: Use numbered points (1., 2., 3., etc.) with clear, concise analysis. Write in plain text without any markdown formatting, bold text, or special characters."
        ),
        temperature: 0.7,
        max_tokens: 1000,
        tier: ModelTier::Standard,
    }
}

/// First comment draft written from an analysis.
pub fn comment(fields: &CommentFields<'_>) -> Prompt {
    let CommentFields {
        analysis,
        platform,
        tone,
    } = fields;

    Prompt {
        system: None,
        user: format!(
            "Using the analysis provided, write a 4-6 sentence comment for the post. Follow these rules:

- Sound like an experienced friend, not a lecturer.
- Blend empathy, authority, and relevant facts or insights naturally.
- Avoid sales hints, calls to action, or self-promotion.
- Maintain a human, conversational tone.
- Avoid sounding like AI.

Platform: {platform}
Tone: {tone}
Analysis: {analysis}"
        ),
        temperature: 0.8,
        max_tokens: 500,
        tier: ModelTier::Premium,
    }
}

/// Story-driven rewrite of an existing comment.
pub fn conversational_comment(fields: &ConversationalFields<'_>) -> Prompt {
    let ConversationalFields {
        original_comment,
        platform,
        tone,
        custom_instructions,
    } = fields;

    let extra = custom_instructions
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("\nAdditional instructions from user:\n{s}\n"))
        .unwrap_or_default();

    Prompt {
        system: Some(CONVERSATIONAL_PERSONA.to_string()),
        user: format!(
            "Transform the following expert comment into a more conversational, story-driven version that feels natural and engaging.

Original expert comment:
\"{original_comment}\"

Platform: {platform}
Desired tone: {tone}

Requirements:
- Make it more conversational and relatable
- Add storytelling elements where appropriate
- Keep the core message and expertise intact
- Sound like a real person sharing genuine experience
- Avoid being overly promotional or corporate
- Use natural language and conversational flow
- Include personal touches or relatable scenarios when relevant
- Maintain the same helpful intent but with more personality
{extra}
Write the conversational version (4-6 sentences):"
        ),
        temperature: 0.8,
        max_tokens: 400,
        tier: ModelTier::Standard,
    }
}

/// Three JSON-array suggestions for making a comment more conversational.
pub fn comment_suggestions(fields: &CommentSuggestionFields<'_>) -> Prompt {
    let CommentSuggestionFields {
        comment,
        platform,
        tone,
    } = fields;

    Prompt {
        system: Some(SUGGESTION_PERSONA.to_string()),
        user: format!(
            "Analyze the following comment and generate 3 specific, actionable suggestions to make it more conversational and story-driven.

Comment: \"{comment}\"
Platform: {platform}
Tone: {tone}

Generate exactly 3 suggestions that are:
- Specific and actionable (not generic advice)
- Different from each other
- Focused on making the comment more conversational, personal, or story-driven
- Concise (under 40 characters each)

Format as JSON array with exactly 3 strings. Examples:
[\"Add a personal anecdote\", \"Include specific numbers/stats\", \"Make it more casual & friendly\"]

Return only the JSON array, no other text."
        ),
        temperature: 0.8,
        max_tokens: 200,
        tier: ModelTier::Standard,
    }
}

/// Three short line-separated suggestions for deepening an analysis.
pub fn analysis_suggestions(fields: &AnalysisSuggestionFields<'_>) -> Prompt {
    let AnalysisSuggestionFields {
        analysis,
        platform,
        tone,
    } = fields;

    Prompt {
        system: Some(format!(
            "You are an expert analysis improvement advisor. Based on the provided post analysis, generate 3 short, actionable suggestions for improving the analysis.

SUGGESTION RULES:
1. Each suggestion should be 2-4 words maximum
2. Focus on adding depth, context, or insights
3. Be specific to the analysis content provided
4. Consider the platform ({platform}) and tone ({tone})
5. Suggest improvements that would make the analysis more valuable
6. Return ONLY the suggestions, no explanatory text or meta-commentary

Examples of good suggestions:
- \"Add competitor data\"
- \"Include user demographics\"
- \"Expand emotional context\"
- \"Add market trends\"
- \"Include success metrics\"
- \"Focus on pain points\"

Current Analysis:
{analysis}

Generate exactly 3 short suggestions as a simple list. No explanations or meta-text."
        )),
        user: ANALYSIS_SUGGESTION_ASK.to_string(),
        temperature: 0.8,
        max_tokens: 150,
        tier: ModelTier::Standard,
    }
}

/// Revision of an existing analysis following user instructions.
pub fn improve_analysis(fields: &ImproveAnalysisFields<'_>) -> Prompt {
    let ImproveAnalysisFields {
        post,
        current_analysis,
        improvement_instructions,
        platform,
        tone,
    } = fields;

    Prompt {
        system: Some(format!(
            "You are an expert research assistant and ghostwriter. Your task is to improve an existing post analysis based on user feedback and instructions.

IMPROVEMENT RULES:
1. Build upon the current analysis - don't completely rewrite unless needed
2. Address the specific improvement instructions provided
3. Maintain the same analytical depth and structure
4. Keep it focused on the original post content
5. Use the same tone and platform consideration as the original

Current Analysis:
{current_analysis}

Improvement Instructions:
{improvement_instructions}

Platform: {platform}
Tone: {tone}

Please provide an improved analysis that addresses the user's specific feedback while maintaining the analytical framework. Keep the same section structure but enhance the content based on the improvement instructions."
        )),
        user: format!(
            "Original Post: {post}

Please improve the analysis based on the instructions provided, maintaining the analytical depth while addressing the specific improvements requested."
        ),
        temperature: 0.7,
        max_tokens: 1500,
        tier: ModelTier::Standard,
    }
}
