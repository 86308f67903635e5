//! # hbnb-adapter-storage-file
//!
//! File-backed persistence: every record lives in one JSON document.
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `hbnb-app::ports::storage`
//! - Load the document once at start-up and keep it in memory
//! - Commit staged changes by rewriting the document atomically
//!   (write to a sibling temp file, then rename)
//!
//! ## Document format
//! A single JSON object keyed `<Class>.<id>`. Each value is the record's flat
//! attribute map plus a `__class__` marker naming its kind:
//!
//! ```json
//! { "Place.P1": { "__class__": "Place", "id": "P1", "name": "Loft", … } }
//! ```
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for port traits) and `hbnb-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod document;
mod error;
mod session;
mod store;

pub use error::StorageError;
pub use session::FileSession;
pub use store::{Config, FileStorage};
