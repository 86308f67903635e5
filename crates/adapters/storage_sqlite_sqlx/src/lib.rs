//! # hbnb-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `hbnb-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Schema
//! One table per kind (`places`, `users`, `reviews`). Typed columns hold the
//! identity, timestamps and, for reviews, the two foreign keys; every other
//! attribute lives in a JSON `attributes` column.
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for port traits) and `hbnb-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod rows;
mod session;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use session::{SqliteSession, SqliteStorage};
