//! Platform and tone selectors. Both only ever end up interpolated into
//! prompt text, so they carry no behavior beyond naming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Social network the reply is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Reddit,
    Linkedin,
    Facebook,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Reddit,
        Platform::Linkedin,
        Platform::Facebook,
        Platform::Twitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Linkedin => "linkedin",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| DomainError::Validation(format!("Unknown platform: {s}")))
    }
}

/// Voice the generated reply should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Casual,
    Professional,
    Friendly,
    Empathetic,
    Storytelling,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Casual,
        Tone::Professional,
        Tone::Friendly,
        Tone::Empathetic,
        Tone::Storytelling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Empathetic => "empathetic",
            Tone::Storytelling => "storytelling",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| DomainError::Validation(format!("Unknown tone: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parses_case_insensitively() {
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::Linkedin);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_tone_serializes_lowercase() {
        let json = serde_json::to_string(&Tone::Storytelling).unwrap();
        assert_eq!(json, "\"storytelling\"");
        assert_eq!(Tone::default(), Tone::Casual);
    }
}
