//! Error body returned by every non-2xx response.

use serde::{Deserialize, Serialize};

/// Code attached to 403 responses for accounts on the trial tier.
pub const UPGRADE_REQUIRED_CODE: &str = "upgrade_required";

/// Error payload: `{ error, title, status, code?, requestId? }`.
///
/// `error` is the human-readable message clients surface directly; `title`
/// is the HTTP reason phrase. Every field decodes leniently so bodies from
/// other servers carrying only `error` still surface their message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            title: title.into(),
            status,
            code: None,
            request_id: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn is_upgrade_required(&self) -> bool {
        self.status == 403 && self.code.as_deref() == Some(UPGRADE_REQUIRED_CODE)
    }

    // Common error constructors
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", error)
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized", error)
    }

    pub fn forbidden(error: impl Into<String>) -> Self {
        Self::new(403, "Forbidden", error)
    }

    pub fn upgrade_required(error: impl Into<String>) -> Self {
        Self::forbidden(error).with_code(UPGRADE_REQUIRED_CODE)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(404, "Not Found", error)
    }

    pub fn conflict(error: impl Into<String>) -> Self {
        Self::new(409, "Conflict", error)
    }

    pub fn too_many_requests() -> Self {
        Self::new(429, "Too Many Requests", "Rate limit exceeded. Please slow down.")
    }

    pub fn bad_gateway(error: impl Into<String>) -> Self {
        Self::new(502, "Bad Gateway", error)
    }

    pub fn internal_error(error: impl Into<String>) -> Self {
        Self::new(500, "Internal Server Error", error)
    }
}
