//! Stats service: record counts.

use std::collections::BTreeMap;

use hbnb_domain::error::HbnbError;
use hbnb_domain::object::EntityKind;

use super::release;
use crate::ports::{Storage, StorageSession};

/// Application service reporting how many records each kind holds.
pub struct StatsService<S> {
    storage: S,
}

impl<S: Storage> StatsService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Count the records of every kind.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the session.
    #[tracing::instrument(skip(self))]
    pub async fn counts(&self) -> Result<BTreeMap<EntityKind, usize>, HbnbError> {
        let mut session = self.storage.open().await?;
        let outcome = counts_in(&mut session).await;
        release(session, outcome).await
    }
}

async fn counts_in<T: StorageSession>(
    session: &mut T,
) -> Result<BTreeMap<EntityKind, usize>, HbnbError> {
    let mut counts = BTreeMap::new();
    for kind in EntityKind::ALL {
        counts.insert(kind, session.count(Some(kind)).await?);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::InMemoryStorage;
    use hbnb_domain::place::Place;
    use hbnb_domain::review::Review;
    use hbnb_domain::user::User;

    fn seeded() -> InMemoryStorage {
        let review = Review::builder()
            .place_id("P1")
            .user_id("U1")
            .text("t")
            .build()
            .unwrap();
        InMemoryStorage::with([
            Place::builder().id("P1").build().into(),
            Place::builder().id("P2").build().into(),
            User::builder().id("U1").build().into(),
            review.into(),
        ])
    }

    #[tokio::test]
    async fn should_count_each_kind() {
        let storage = seeded();
        let svc = StatsService::new(storage.clone());

        let counts = svc.counts().await.unwrap();

        assert_eq!(counts[&EntityKind::Place], 2);
        assert_eq!(counts[&EntityKind::User], 1);
        assert_eq!(counts[&EntityKind::Review], 1);
        storage.assert_balanced();
    }

    #[tokio::test]
    async fn should_report_zero_for_empty_kinds() {
        let svc = StatsService::new(InMemoryStorage::default());
        let counts = svc.counts().await.unwrap();
        assert!(counts.values().all(|n| *n == 0));
        assert_eq!(counts.len(), EntityKind::ALL.len());
    }
}
