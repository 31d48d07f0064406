//! Title extraction shared by the segmenter strategies.

use std::sync::LazyLock;

use regex::Regex;

use super::clean::strip_markdown;

/// Title used when the content has no sentence at all.
pub const FALLBACK_TITLE: &str = "Analysis Point";

const ELLIPSIS: &str = "...";

static QUESTION_LEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(what|why|how|when|where|who)\s+((is|are|was|were|do|does|did|can|could|should|would|will)\s+)?",
    )
    .expect("static regex must compile")
});
static DETERMINER_LEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(the|this|that|these|those)\s+").expect("static regex must compile")
});

/// Turn the first sentence of `content` into a short title.
///
/// Leading question words ("What is", "Why does") and determiners are
/// dropped, the result is cut to at most `max_len` characters including the
/// ellipsis, and the first letter is upper-cased.
pub fn extract_title(content: &str, max_len: usize) -> String {
    let cleaned = strip_markdown(content);
    let Some(sentence) = cleaned
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|s| !s.is_empty())
    else {
        return FALLBACK_TITLE.to_string();
    };

    let without_question = QUESTION_LEAD.replace(sentence, "");
    let title = DETERMINER_LEAD.replace(&without_question, "");
    let title = match title.trim() {
        "" => sentence,
        trimmed => trimmed,
    };

    truncate(&capitalize_first(title), max_len)
}

/// Split `Label: rest` into a title and a body line.
///
/// Falls back to [`extract_title`] with the whole text as body when the text
/// has no short label before a colon.
pub(crate) fn split_heading(text: &str, max_len: usize) -> (String, String) {
    let text = text.trim();
    if let Some((label, rest)) = text.split_once(':') {
        let label = strip_markdown(label);
        let is_label = !label.is_empty()
            && label.chars().count() <= max_len
            && !label.contains(['.', '!', '?'])
            && rest.chars().next().is_none_or(char::is_whitespace);
        if is_label {
            return (capitalize_first(&label), rest.trim().to_string());
        }
    }

    (extract_title(text, max_len), text.to_string())
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len < ELLIPSIS.len() {
        return text.chars().take(max_len).collect();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let head: String = text.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", head.trim_end())
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_strips_question_lead() {
        let title = extract_title("What is the main problem here?", 40);
        assert_eq!(title, "Main problem here");
        assert!(title.chars().count() <= 40);
        assert!(!title.ends_with('.'));
    }

    #[test]
    fn test_extract_title_respects_tiny_limits() {
        for max_len in 0..=4 {
            let title = extract_title("Overwhelmed by deadlines", max_len);
            assert!(title.chars().count() <= max_len, "{title:?} exceeds {max_len}");
        }
        assert_eq!(extract_title("Overwhelmed by deadlines", 2), "Ov");
    }

    #[test]
    fn test_extract_title_truncates_with_ellipsis() {
        let title = extract_title(
            "the poster keeps saying yes to every single request from their manager",
            35,
        );
        assert_eq!(title.chars().count(), 35);
        assert!(title.starts_with("Poster keeps saying"));
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_extract_title_uses_first_sentence_only() {
        assert_eq!(extract_title("They feel stuck. Nothing works!", 40), "They feel stuck");
    }

    #[test]
    fn test_extract_title_without_sentences() {
        assert_eq!(extract_title("", 40), FALLBACK_TITLE);
        assert_eq!(extract_title(" ... !?", 40), FALLBACK_TITLE);
    }

    #[test]
    fn test_extract_title_handles_multibyte_text() {
        let title = extract_title("ünïcödé wörds everywhere in this long title text", 12);
        assert_eq!(title.chars().count(), 12);
        assert!(title.starts_with('Ü'));
    }

    #[test]
    fn test_split_heading_prefers_label() {
        let (title, body) = split_heading("Main Problem: The poster is overwhelmed.", 35);
        assert_eq!(title, "Main Problem");
        assert_eq!(body, "The poster is overwhelmed.");
    }

    #[test]
    fn test_split_heading_ignores_urls_and_long_labels() {
        let (title, body) = split_heading("See https://example.com for details", 35);
        assert_eq!(title, "See https://example");
        assert_eq!(body, "See https://example.com for details");
    }
}
