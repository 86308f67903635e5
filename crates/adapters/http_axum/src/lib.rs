//! # hbnb-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **REST JSON API** for reviews nested under places
//!   (`/places/{place_id}/reviews`, `/reviews/{review_id}`)
//! - Serve `/status` and `/stats`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for port traits and services) and `hbnb-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
mod error;
mod extract;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use extract::JsonPayload;
