use serde::{Deserialize, Serialize};

use replysmith_core::domain::Section;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatAnalysisRequest {
    #[serde(default)]
    pub analysis: String,
}

/// Cleaned analysis text plus its display sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatAnalysisResponse {
    pub cleaned: String,
    pub sections: Vec<Section>,
}
