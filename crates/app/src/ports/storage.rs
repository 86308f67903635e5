//! Storage port: the persistence boundary.
//!
//! A [`Storage`] is the long-lived backend chosen at start-up. Each use-case
//! opens one [`StorageSession`] from it, works through that session, and
//! closes it before returning. Writes are staged on the session and only
//! become visible to other sessions once [`StorageSession::save`] commits
//! them; a session dropped or closed with staged changes discards them.

use std::collections::BTreeMap;
use std::future::Future;

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::PlaceId;
use hbnb_domain::object::{EntityKind, Model, Object};
use hbnb_domain::review::Review;

/// A persistence backend.
pub trait Storage: Send + Sync + 'static {
    type Session: StorageSession;

    /// Acquire a session (a pooled connection, a view on the loaded file).
    fn open(&self) -> impl Future<Output = Result<Self::Session, HbnbError>> + Send;
}

/// A unit of work against a [`Storage`].
pub trait StorageSession: Send {
    /// Look up a committed record.
    fn get(
        &mut self,
        kind: EntityKind,
        id: &str,
    ) -> impl Future<Output = Result<Option<Object>, HbnbError>> + Send;

    /// Stage a new record, or the new state of an existing one.
    fn stage(&mut self, object: Object);

    /// Stage the removal of a record.
    fn delete(&mut self, object: &Object);

    /// Commit every staged change, all or nothing.
    fn save(&mut self) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Count committed records, of one kind or of every kind.
    fn count(
        &mut self,
        kind: Option<EntityKind>,
    ) -> impl Future<Output = Result<usize, HbnbError>> + Send;

    /// Every committed record, of one kind or of every kind, keyed `<Class>.<id>`.
    fn all(
        &mut self,
        kind: Option<EntityKind>,
    ) -> impl Future<Output = Result<BTreeMap<String, Object>, HbnbError>> + Send;

    /// Reviews written about `place_id`, in storage order.
    fn place_reviews(
        &mut self,
        place_id: &PlaceId,
    ) -> impl Future<Output = Result<Vec<Review>, HbnbError>> + Send;

    /// Release the session. Unsaved staged changes are discarded.
    fn close(self) -> impl Future<Output = Result<(), HbnbError>> + Send;
}

/// Typed helpers on top of [`StorageSession`].
pub trait SessionExt: StorageSession {
    /// Look up a committed record of type `M`.
    fn fetch<M: Model>(
        &mut self,
        id: &str,
    ) -> impl Future<Output = Result<Option<M>, HbnbError>> + Send {
        async move {
            let object = self.get(M::KIND, id).await?;
            Ok(object.and_then(M::from_object))
        }
    }
}

impl<S: StorageSession> SessionExt for S {}
