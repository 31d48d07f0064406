//! # Replysmith Client
//!
//! Async client for the `/functions/v1/*` generation endpoints, plus
//! [`ReplySession`], which keeps the state of one post-to-comment flow.

mod client;
mod error;
mod session;

pub use client::ReplyClient;
pub use error::ClientError;
pub use session::ReplySession;
