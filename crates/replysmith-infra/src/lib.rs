//! # Replysmith Infrastructure
//!
//! Concrete implementations of the ports defined in `replysmith-core`:
//! persistence, credentials, rate limiting and the chat-completion client.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory repository and the model client only
//! - `postgres` - PostgreSQL user repository via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Keyed rate limiting via governor

pub mod database;
pub mod llm;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use database::{DatabaseConfig, DatabaseConnections, InMemoryUserRepository};
pub use llm::{OpenAiChatClient, OpenAiConfig};

#[cfg(feature = "postgres")]
pub use database::PostgresUserRepository;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
