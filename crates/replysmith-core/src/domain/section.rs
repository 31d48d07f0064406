use serde::{Deserialize, Serialize};

/// Display category of an analysis section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionIcon {
    Problem,
    Emotion,
    Help,
    RootCause,
    Insight,
    Angle,
    General,
}

/// A labeled chunk of analysis text, derived for display and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: Vec<String>,
    pub icon: SectionIcon,
}
