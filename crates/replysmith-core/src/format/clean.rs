//! Markdown and boilerplate removal.

use std::sync::LazyLock;

use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex must compile")
}

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)```.*?```"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| re(r"\*\*(.*?)\*\*"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| re(r"\*(.*?)\*"));
static HEADER: LazyLock<Regex> = LazyLock::new(|| re(r"#{1,6}\s"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| re(r"`(.*?)`"));
static LINK: LazyLock<Regex> = LazyLock::new(|| re(r"\[(.*?)\]\(.*?\)"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[ \t]*[-*+][ \t]"));
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[ \t]*\d+\.[ \t]"));

static LEADING_DASH: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^-[ \t]*"));
static LEADING_STAR: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^\*[ \t]*"));
static HERES: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bHere['’]s\s+"));
static HERE_IS: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bHere\s+is\s+"));
static BASED_ON_INTRO: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?im)^Based on.*?[:.][ \t]*"));
static AI_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(ChatGPT|GPT|AI|artificial intelligence)\b"));
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| re(r"[ \t]{2,}"));

static META_COMMENTARY: LazyLock<[Regex; 7]> = LazyLock::new(|| {
    [
        re(r"(?m)^.*?By incorporating.*?\."),
        re(r"(?m)^.*?This analysis.*?\."),
        re(r"(?m)^.*?The (improved|enhanced|updated).*?\."),
        re(r"(?m)^.*?This approach.*?\."),
        re(r"(?m)^.*?(provides|offers|gives).*?(perspective|insight|analysis).*?\."),
        re(r"(?m)^.*?Based on.*?[:.][ \t]*"),
        re(r"(?m)^.*?Here('s|[ \t]+is).*?[:.][ \t]*"),
    ]
});
static META_BULLET: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[ \t]*[-*][ \t]*"));

/// Remove markdown syntax: emphasis, headers, code, links and list markers.
pub fn strip_markdown(text: &str) -> String {
    let text = strip_inline_markdown(text);
    NUMBERED.replace_all(&text, "").trim().to_string()
}

/// Everything `strip_markdown` does except removing numbered list markers,
/// which the segmenter still needs to see.
pub(crate) fn strip_inline_markdown(text: &str) -> String {
    let text = CODE_BLOCK.replace_all(text, "");
    let text = BOLD.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = HEADER.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "${1}");
    let text = LINK.replace_all(&text, "${1}");
    BULLET.replace_all(&text, "").into_owned()
}

/// Remove filler openers and references to the model itself.
pub fn clean_ai_text(text: &str) -> String {
    let text = LEADING_DASH.replace_all(text, "");
    let text = LEADING_STAR.replace_all(&text, "");
    let text = HERES.replace_all(&text, "");
    let text = HERE_IS.replace_all(&text, "");
    let text = BASED_ON_INTRO.replace_all(&text, "");
    let text = AI_REFERENCE.replace_all(&text, "");
    SPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Remove lines where the model talks about its own answer
/// ("This analysis provides...", "Here is the improved version:").
pub fn clean_meta_commentary(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in META_COMMENTARY.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    META_BULLET.replace_all(&cleaned, "").trim().to_string()
}

/// Meta-commentary removal followed by one blank line between every
/// remaining non-empty line.
pub fn clean_analysis_text(text: &str) -> String {
    clean_meta_commentary(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markdown_emphasis_and_code() {
        assert_eq!(
            strip_markdown("**bold** and *italic* and `code`"),
            "bold and italic and code"
        );
    }

    #[test]
    fn test_strip_markdown_structure() {
        let input = "## Heading\n- first\n* second\n1. third\nSee [docs](https://example.com)\n```\nlet x = 1;\n```";
        assert_eq!(strip_markdown(input), "Heading\nfirst\nsecond\nthird\nSee docs");
    }

    #[test]
    fn test_strip_inline_keeps_numbering() {
        assert_eq!(strip_inline_markdown("1. **Main Problem**"), "1. Main Problem");
    }

    #[test]
    fn test_clean_ai_text_removes_filler() {
        let input = "Here's the breakdown\nBased on the post: the user is tired\nAs an AI model I think";
        assert_eq!(
            clean_ai_text(input),
            "the breakdown\nthe user is tired\nAs an model I think"
        );
    }

    #[test]
    fn test_clean_ai_text_keeps_words_containing_ai() {
        assert_eq!(clean_ai_text("Said the aide"), "Said the aide");
    }

    #[test]
    fn test_clean_analysis_text_drops_meta_lines() {
        let input = "Here is the improved analysis:\nThe poster feels stuck.\n\n\n- They need steps.\nThis analysis offers a fresh perspective.";
        assert_eq!(
            clean_analysis_text(input),
            "The poster feels stuck.\n\nThey need steps."
        );
    }
}
