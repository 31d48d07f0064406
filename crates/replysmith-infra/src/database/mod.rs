//! User persistence: PostgreSQL via SeaORM, or an in-memory map.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections, SecondaryDbConfig};
pub use memory::InMemoryUserRepository;

#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresUserRepository;
