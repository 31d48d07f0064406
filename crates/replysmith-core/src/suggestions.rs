//! Suggestion parsing.
//!
//! Models are asked for exactly three short suggestions but do not always
//! comply. A malformed reply is never an error: it is replaced by one of the
//! fixed fallback sets below, picked by call site.

use std::sync::LazyLock;

use regex::Regex;

/// Number of suggestions every suggestion call produces.
pub const SUGGESTION_COUNT: usize = 3;

/// Analysis suggestions at or above this many characters are discarded.
const MAX_ANALYSIS_SUGGESTION_CHARS: usize = 30;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\s*|-\s*)").expect("static regex must compile"));

/// The hardcoded suggestion sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSet {
    /// Comment suggestions that failed to parse as a JSON array.
    Comment,
    /// Padding for analysis suggestions when the model returned fewer than three usable lines.
    AnalysisPadding,
    /// Analysis suggestions that could not be fetched or decoded by a client.
    AnalysisClient,
}

impl FallbackSet {
    pub fn entries(&self) -> [&'static str; SUGGESTION_COUNT] {
        match self {
            FallbackSet::Comment => [
                "Add a personal example",
                "Include relatable details",
                "Make it more conversational",
            ],
            FallbackSet::AnalysisPadding => [
                "Add more context",
                "Include specific data",
                "Expand key insights",
            ],
            FallbackSet::AnalysisClient => [
                "Add more emotional context",
                "Include specific statistics",
                "Focus on actionable insights",
            ],
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.entries().iter().map(|s| s.to_string()).collect()
    }
}

/// Parse a reply that should be a JSON array of exactly three strings.
///
/// A surrounding markdown code fence is tolerated.
pub fn parse_suggestion_array(reply: &str) -> Option<Vec<String>> {
    let body = strip_code_fence(reply.trim());
    let suggestions: Vec<String> = serde_json::from_str(body).ok()?;
    if suggestions.len() != SUGGESTION_COUNT {
        return None;
    }
    Some(suggestions.into_iter().map(|s| s.trim().to_string()).collect())
}

/// Comment suggestions: the JSON array, or the comment fallback set.
pub fn parse_comment_suggestions(reply: &str) -> Vec<String> {
    parse_suggestion_array(reply).unwrap_or_else(|| {
        tracing::warn!(reply = %reply, "Failed to parse suggestions, using fallback");
        FallbackSet::Comment.suggestions()
    })
}

/// Analysis suggestions: one per line, list markers and quotes removed,
/// only short lines kept, padded to three from the padding set.
pub fn parse_analysis_suggestions(reply: &str) -> Vec<String> {
    let mut suggestions: Vec<String> = reply
        .lines()
        .map(|line| {
            let line = LIST_MARKER.replace(line.trim(), "");
            line.trim().trim_matches(['"', '\'']).trim().to_string()
        })
        .filter(|line| !line.is_empty() && line.chars().count() < MAX_ANALYSIS_SUGGESTION_CHARS)
        .take(SUGGESTION_COUNT)
        .collect();

    let missing = SUGGESTION_COUNT - suggestions.len();
    suggestions.extend(
        FallbackSet::AnalysisPadding
            .entries()
            .iter()
            .take(missing)
            .map(|s| s.to_string()),
    );
    suggestions
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop an info string such as `json` on the opening fence line.
    match inner.split_once('\n') {
        Some((info, rest)) if !info.trim_start().starts_with('[') => rest.trim(),
        _ => inner.trim(),
    }
}
