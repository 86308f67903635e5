//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod reviews;
#[allow(clippy::missing_errors_doc)]
pub mod stats;
