//! Storage-specific error type for the file backend.

use hbnb_domain::error::HbnbError;
use hbnb_domain::object::UnknownKind;

/// Errors originating from the file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the document failed.
    #[error("file storage I/O error")]
    Io(#[from] std::io::Error),

    /// The document or one of its records is not valid JSON for its kind.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// A record names a class this backend does not know.
    #[error("unknown record class")]
    UnknownKind(#[from] UnknownKind),

    /// The document root is not a JSON object.
    #[error("storage document is not a JSON object")]
    NotADocument,

    /// A record value is not a JSON object.
    #[error("record {key} is not a JSON object")]
    NotARecord { key: String },
}

impl From<StorageError> for HbnbError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
