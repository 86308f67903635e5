//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HbnbError`]
//! via `#[from]`. Display strings of [`ValidationError`] are part of the HTTP
//! contract and must not change.

/// Top-level error returned by services and storage ports.
#[derive(Debug, thiserror::Error)]
pub enum HbnbError {
    /// The request payload was malformed or incomplete.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Malformed or incomplete request payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body is not a JSON object.
    #[error("Not a JSON")]
    NotJson,

    /// A required key is absent from the body.
    #[error("Missing {0}")]
    MissingField(&'static str),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Class name of the missing record (`Place`, `Review`, `User`).
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}
