//! # hbnb-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage port** adapters must implement:
//!   - `Storage`: opens a session per operation
//!   - `StorageSession`: get / stage / delete / save / count / all / close
//! - Define the **use-cases** the HTTP layer drives:
//!   - `ReviewService`: list, get, create, update, delete reviews
//!   - `StatsService`: record counts per kind
//! - Guarantee every session a use-case opens is closed again, whatever the
//!   outcome
//!
//! ## Dependency rule
//! Depends on `hbnb-domain` only. Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
