//! # Replysmith Core
//!
//! The domain layer of Replysmith.
//! Prompt templates, analysis segmentation, suggestion parsing and the role
//! gate all live here as pure functions; anything that talks to the network or
//! a database is reached through the traits in [`ports`].

pub mod access;
pub mod domain;
pub mod error;
pub mod format;
pub mod ports;
pub mod prompts;
pub mod service;
pub mod suggestions;

pub use error::DomainError;
