//! Application services: use-case implementations.
//!
//! Each service struct accepts a [`Storage`] implementation via a generic
//! parameter (constructor injection), keeping this layer decoupled from
//! concrete adapters.

pub mod review_service;
pub mod stats_service;

use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::object::Model;

use crate::ports::{SessionExt, StorageSession};

/// Close `session` and hand back `outcome`.
///
/// The session is closed whether or not the operation succeeded. A close
/// failure never changes the outcome: by then anything the operation wrote
/// is already committed, so it is only logged.
async fn release<T, S: StorageSession>(
    session: S,
    outcome: Result<T, HbnbError>,
) -> Result<T, HbnbError> {
    if let Err(err) = session.close().await {
        tracing::warn!(error = %err, "failed to close storage session");
    }
    outcome
}

/// Fetch a record that must exist.
async fn require<M: Model, S: StorageSession>(session: &mut S, id: &str) -> Result<M, HbnbError> {
    session.fetch::<M>(id).await?.ok_or_else(|| {
        NotFoundError {
            entity: M::KIND.class_name(),
            id: id.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory storage used by the service tests.

    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use hbnb_domain::error::HbnbError;
    use hbnb_domain::id::PlaceId;
    use hbnb_domain::object::{EntityKind, Object};
    use hbnb_domain::review::Review;

    use crate::ports::{Storage, StorageSession};

    enum Change {
        Put(Object),
        Remove(String),
    }

    /// Committed records in insertion order, shared by every session.
    #[derive(Clone, Default)]
    pub struct InMemoryStorage {
        records: Arc<Mutex<Vec<Object>>>,
        pub opened: Arc<AtomicUsize>,
        pub closed: Arc<AtomicUsize>,
        pub fail_close: Arc<AtomicBool>,
    }

    impl InMemoryStorage {
        pub fn with(objects: impl IntoIterator<Item = Object>) -> Self {
            let storage = Self::default();
            storage.records.lock().unwrap().extend(objects);
            storage
        }

        pub fn snapshot(&self) -> Vec<Object> {
            self.records.lock().unwrap().clone()
        }

        pub fn assert_balanced(&self) {
            assert_eq!(
                self.opened.load(Ordering::SeqCst),
                self.closed.load(Ordering::SeqCst),
                "every opened session must be closed"
            );
        }
    }

    pub struct InMemorySession {
        storage: InMemoryStorage,
        staged: Vec<Change>,
    }

    impl Storage for InMemoryStorage {
        type Session = InMemorySession;

        async fn open(&self) -> Result<InMemorySession, HbnbError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(InMemorySession {
                storage: self.clone(),
                staged: Vec::new(),
            })
        }
    }

    impl StorageSession for InMemorySession {
        async fn get(&mut self, kind: EntityKind, id: &str) -> Result<Option<Object>, HbnbError> {
            let key = kind.key(id);
            let records = self.storage.records.lock().unwrap();
            Ok(records.iter().find(|o| o.key() == key).cloned())
        }

        fn stage(&mut self, object: Object) {
            self.staged.push(Change::Put(object));
        }

        fn delete(&mut self, object: &Object) {
            self.staged.push(Change::Remove(object.key()));
        }

        async fn save(&mut self) -> Result<(), HbnbError> {
            let mut records = self.storage.records.lock().unwrap();
            for change in self.staged.drain(..) {
                match change {
                    Change::Put(object) => {
                        let key = object.key();
                        match records.iter_mut().find(|o| o.key() == key) {
                            Some(existing) => *existing = object,
                            None => records.push(object),
                        }
                    }
                    Change::Remove(key) => records.retain(|o| o.key() != key),
                }
            }
            Ok(())
        }

        async fn count(&mut self, kind: Option<EntityKind>) -> Result<usize, HbnbError> {
            let records = self.storage.records.lock().unwrap();
            Ok(records
                .iter()
                .filter(|o| kind.is_none_or(|k| o.kind() == k))
                .count())
        }

        async fn all(
            &mut self,
            kind: Option<EntityKind>,
        ) -> Result<BTreeMap<String, Object>, HbnbError> {
            let records = self.storage.records.lock().unwrap();
            Ok(records
                .iter()
                .filter(|o| kind.is_none_or(|k| o.kind() == k))
                .map(|o| (o.key(), o.clone()))
                .collect())
        }

        async fn place_reviews(&mut self, place_id: &PlaceId) -> Result<Vec<Review>, HbnbError> {
            let records = self.storage.records.lock().unwrap();
            Ok(records
                .iter()
                .filter_map(|o| match o {
                    Object::Review(review) if &review.place_id == place_id => Some(review.clone()),
                    _ => None,
                })
                .collect())
        }

        async fn close(self) -> Result<(), HbnbError> {
            self.storage.closed.fetch_add(1, Ordering::SeqCst);
            if self.storage.fail_close.load(Ordering::SeqCst) {
                return Err(HbnbError::Storage("connection lost".into()));
            }
            Ok(())
        }
    }
}
