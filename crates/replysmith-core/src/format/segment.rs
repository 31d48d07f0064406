//! Analysis segmentation.
//!
//! Strategies are tried in order and the first one that recognizes the text
//! wins: numbered list, blank-line paragraphs, then a single block that
//! accepts anything. The output is never empty.

use std::sync::LazyLock;

use regex::Regex;

use super::clean::{clean_ai_text, strip_inline_markdown};
use super::title::split_heading;
use crate::domain::{Section, SectionIcon};

/// Title length limit for sections opened by a numbered line.
pub const MAX_NUMBERED_TITLE: usize = 35;
/// Title length limit for paragraph sections.
pub const MAX_PARAGRAPH_TITLE: usize = 40;
/// Title of the single-block fallback section.
pub const OVERVIEW_TITLE: &str = "Analysis Overview";

const MIN_NUMBERED_LINES: usize = 3;
const MIN_PARAGRAPHS: usize = 2;

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.(\s|$)").expect("static regex must compile"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("static regex must compile"));

/// Ordered keyword table; the first entry with a matching keyword decides the
/// icon. Keys overlap ("state" also hits "statement"), first match wins.
const ICON_KEYWORDS: &[(SectionIcon, &[&str])] = &[
    (
        SectionIcon::Problem,
        &["problem", "struggl", "issue", "challenge", "asking"],
    ),
    (
        SectionIcon::Emotion,
        &["emotion", "feel", "state", "stress", "anxi", "frustrat"],
    ),
    (
        SectionIcon::Help,
        &["help", "support", "need", "validation", "guidance"],
    ),
    (SectionIcon::RootCause, &["root", "cause", "underlying"]),
    (
        SectionIcon::Insight,
        &["fact", "stat", "research", "study", "data", "insight", "%"],
    ),
    (
        SectionIcon::Angle,
        &["angle", "comment", "approach", "story", "respond"],
    ),
];

type Strategy = fn(&str) -> Option<Vec<Section>>;

const STRATEGIES: [Strategy; 2] = [numbered_sections, paragraph_sections];

/// Split free-text analysis into display sections, in source order.
pub fn segment_analysis(analysis: &str) -> Vec<Section> {
    let text = normalize(analysis);
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&text))
        .unwrap_or_else(|| single_block(&text))
}

/// Pick the icon for a section from its lower-cased title and content.
pub fn classify_icon(title: &str, content: &[String]) -> SectionIcon {
    let haystack = format!("{} {}", title, content.join(" ")).to_lowercase();
    ICON_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(icon, _)| *icon)
        .unwrap_or(SectionIcon::General)
}

fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    clean_ai_text(&strip_inline_markdown(&text))
}

fn numbered_sections(text: &str) -> Option<Vec<Section>> {
    let numbered = text.lines().filter(|l| NUMBERED_LINE.is_match(l)).count();
    if numbered < MIN_NUMBERED_LINES {
        return None;
    }

    let mut drafts: Vec<Draft> = Vec::with_capacity(numbered);
    for line in text.lines() {
        if let Some(marker) = NUMBERED_LINE.find(line) {
            let (title, body) = split_heading(&line[marker.end()..], MAX_NUMBERED_TITLE);
            let mut draft = Draft::new(title);
            draft.push(&body);
            drafts.push(draft);
        } else if let Some(current) = drafts.last_mut() {
            current.push(line);
        }
    }

    Some(drafts.into_iter().map(Draft::finish).collect())
}

fn paragraph_sections(text: &str) -> Option<Vec<Section>> {
    let paragraphs: Vec<&str> = PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.len() < MIN_PARAGRAPHS {
        return None;
    }

    let sections = paragraphs
        .into_iter()
        .map(|paragraph| {
            let mut lines = paragraph.lines().map(str::trim).filter(|l| !l.is_empty());
            let first = lines.next().unwrap_or_default();
            let (title, body) = split_heading(first, MAX_PARAGRAPH_TITLE);
            let mut draft = Draft::new(title);
            draft.push(&body);
            lines.for_each(|line| draft.push(line));
            draft.finish()
        })
        .collect();

    Some(sections)
}

fn single_block(text: &str) -> Vec<Section> {
    let mut draft = Draft::new(OVERVIEW_TITLE.to_string());
    draft.content = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    vec![draft.finish()]
}

struct Draft {
    title: String,
    content: Vec<String>,
}

impl Draft {
    fn new(title: String) -> Self {
        Self {
            title,
            content: Vec::new(),
        }
    }

    /// Append a content line unless it is blank or already present.
    fn push(&mut self, line: &str) {
        let line = line.trim();
        if !line.is_empty() && !self.content.iter().any(|c| c == line) {
            self.content.push(line.to_string());
        }
    }

    fn finish(self) -> Section {
        let icon = classify_icon(&self.title, &self.content);
        Section {
            title: self.title,
            content: self.content,
            icon,
        }
    }
}
