//! Sessions over a [`FileStorage`].

use std::collections::BTreeMap;

use hbnb_app::ports::StorageSession;
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::PlaceId;
use hbnb_domain::object::{EntityKind, Object};
use hbnb_domain::review::Review;

use crate::store::{Change, FileStorage};

/// A unit of work on the file store. Reads see committed records only.
pub struct FileSession {
    storage: FileStorage,
    staged: Vec<Change>,
}

impl FileSession {
    pub(crate) fn new(storage: FileStorage) -> Self {
        Self {
            storage,
            staged: Vec::new(),
        }
    }
}

fn matches_kind(object: &Object, kind: Option<EntityKind>) -> bool {
    kind.is_none_or(|kind| object.kind() == kind)
}

impl StorageSession for FileSession {
    async fn get(&mut self, kind: EntityKind, id: &str) -> Result<Option<Object>, HbnbError> {
        let key = kind.key(id);
        Ok(self.storage.read(|records| records.get(&key).cloned()).await)
    }

    fn stage(&mut self, object: Object) {
        self.staged.push(Change::Put(object));
    }

    fn delete(&mut self, object: &Object) {
        self.staged.push(Change::Remove(object.key()));
    }

    async fn save(&mut self) -> Result<(), HbnbError> {
        if self.staged.is_empty() {
            return Ok(());
        }
        let changes = std::mem::take(&mut self.staged);
        let count = changes.len();
        self.storage.commit(changes).await?;
        tracing::debug!(changes = count, path = %self.storage.path().display(), "file storage saved");
        Ok(())
    }

    async fn count(&mut self, kind: Option<EntityKind>) -> Result<usize, HbnbError> {
        Ok(self
            .storage
            .read(|records| records.values().filter(|o| matches_kind(o, kind)).count())
            .await)
    }

    async fn all(
        &mut self,
        kind: Option<EntityKind>,
    ) -> Result<BTreeMap<String, Object>, HbnbError> {
        Ok(self
            .storage
            .read(|records| {
                records
                    .iter()
                    .filter(|(_, o)| matches_kind(o, kind))
                    .map(|(key, o)| (key.clone(), o.clone()))
                    .collect()
            })
            .await)
    }

    /// Ordered by `created_at`, then id: the document itself keeps no
    /// insertion order.
    async fn place_reviews(&mut self, place_id: &PlaceId) -> Result<Vec<Review>, HbnbError> {
        let mut reviews: Vec<Review> = self
            .storage
            .read(|records| {
                records
                    .values()
                    .filter_map(|object| match object {
                        Object::Review(review) if &review.place_id == place_id => {
                            Some(review.clone())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .await;
        reviews.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(reviews)
    }

    async fn close(self) -> Result<(), HbnbError> {
        if !self.staged.is_empty() {
            tracing::debug!(
                discarded = self.staged.len(),
                "closing file session with unsaved changes"
            );
        }
        Ok(())
    }
}
