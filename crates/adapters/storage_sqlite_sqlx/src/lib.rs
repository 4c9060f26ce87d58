//! # purgehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `purgehub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run embedded migrations
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `purgehub-app` (for port traits) and `purgehub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod config_repo;
mod error;
mod pool;
mod user_repo;

pub use config_repo::SqliteConfigRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
