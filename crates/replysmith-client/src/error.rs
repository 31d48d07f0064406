use thiserror::Error;

/// Errors surfaced by [`crate::ReplyClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Required input was blank; no request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is the body's `error` field or a generic
    /// per-operation fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The account is on the trial tier.
    #[error("{0}")]
    UpgradeRequired(String),

    #[error("failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::UpgradeRequired(_) => Some(403),
            _ => None,
        }
    }
}
