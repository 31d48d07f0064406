//! # Replysmith Shared
//!
//! Request and response bodies exchanged between the API server and
//! `replysmith-client`. Field names are camelCase on the wire.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, UPGRADE_REQUIRED_CODE};
