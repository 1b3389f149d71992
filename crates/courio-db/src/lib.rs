//! Courio Database: SurrealDB connection management, schema
//! migrations and the credential store implementation.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Repository implementations of the `courio-core` store traits
//!   ([`repository::SurrealUserRepository`],
//!   [`repository::SurrealSessionRepository`])
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
