//! Review service: use-cases for reviews nested under places.

use serde_json::Value;

use hbnb_domain::error::{HbnbError, NotFoundError, ValidationError};
use hbnb_domain::object::{EntityKind, Object};
use hbnb_domain::payload::Payload;
use hbnb_domain::place::Place;
use hbnb_domain::review::Review;
use hbnb_domain::time::now;
use hbnb_domain::user::User;

use super::{release, require};
use crate::ports::{Storage, StorageSession};

/// Application service for review CRUD.
///
/// Every method opens its own storage session and closes it before
/// returning; nothing is cached between calls.
pub struct ReviewService<S> {
    storage: S,
}

impl<S: Storage> ReviewService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List the reviews of a place, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn list_reviews(&self, place_id: &str) -> Result<Vec<Review>, HbnbError> {
        let mut session = self.storage.open().await?;
        let outcome = list_in(&mut session, place_id).await;
        release(session, outcome).await
    }

    /// Look up a review by id.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no review with `id` exists, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_review(&self, id: &str) -> Result<Review, HbnbError> {
        let mut session = self.storage.open().await?;
        let outcome = require::<Review, _>(&mut session, id).await;
        release(session, outcome).await
    }

    /// Delete a review by id.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no review with `id` exists (also
    /// on a repeated delete), or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_review(&self, id: &str) -> Result<(), HbnbError> {
        let mut session = self.storage.open().await?;
        let outcome = delete_in(&mut session, id).await;
        release(session, outcome).await
    }

    /// Create a review of `place_id` from a request body.
    ///
    /// Checks run in this order and stop at the first failure: the place
    /// exists, the body is a JSON object, it has `user_id`, it has `text`,
    /// the user exists.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] for a missing place or user,
    /// [`HbnbError::Validation`] for a bad body, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create_review(
        &self,
        place_id: &str,
        payload: Payload,
    ) -> Result<Review, HbnbError> {
        let mut session = self.storage.open().await?;
        let outcome = create_in(&mut session, place_id, payload).await;
        release(session, outcome).await
    }

    /// Overwrite the mutable attributes of a review with those in the body.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the review does not exist,
    /// [`HbnbError::Validation`] when the body is not a JSON object, or a
    /// storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_review(&self, id: &str, payload: Payload) -> Result<Review, HbnbError> {
        let mut session = self.storage.open().await?;
        let outcome = update_in(&mut session, id, payload).await;
        release(session, outcome).await
    }
}

async fn list_in<T: StorageSession>(
    session: &mut T,
    place_id: &str,
) -> Result<Vec<Review>, HbnbError> {
    let place = require::<Place, _>(session, place_id).await?;
    session.place_reviews(&place.id).await
}

async fn delete_in<T: StorageSession>(session: &mut T, id: &str) -> Result<(), HbnbError> {
    let review = require::<Review, _>(session, id).await?;
    session.delete(&Object::from(review));
    session.save().await?;
    tracing::debug!(review_id = id, "review deleted");
    Ok(())
}

async fn create_in<T: StorageSession>(
    session: &mut T,
    place_id: &str,
    payload: Payload,
) -> Result<Review, HbnbError> {
    let place = require::<Place, _>(session, place_id).await?;
    let body = payload.into_object()?;

    let user_id = match body.get("user_id") {
        None => return Err(ValidationError::MissingField("user_id").into()),
        Some(value) => value.clone(),
    };
    if !body.contains_key(Review::TEXT) {
        return Err(ValidationError::MissingField(Review::TEXT).into());
    }

    // Ids are strings: any other JSON value cannot name a user.
    let user = match user_id {
        Value::String(user_id) => require::<User, _>(session, &user_id).await?,
        other => {
            return Err(NotFoundError {
                entity: EntityKind::User.class_name(),
                id: other.to_string(),
            }
            .into());
        }
    };

    let review = Review::from_payload(place.id, user.id, body)?;
    session.stage(review.clone().into());
    session.save().await?;
    tracing::debug!(review_id = %review.id, place_id = %review.place_id, "review created");
    Ok(review)
}

async fn update_in<T: StorageSession>(
    session: &mut T,
    id: &str,
    payload: Payload,
) -> Result<Review, HbnbError> {
    let mut review = require::<Review, _>(session, id).await?;
    let changes = payload.into_object()?;

    review.merge(changes, now());
    session.stage(review.clone().into());
    session.save().await?;
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::services::testing::InMemoryStorage;
    use hbnb_domain::attributes::Attributes;
    use serde_json::json;

    fn body(value: Value) -> Payload {
        match value {
            Value::Object(map) => Payload::Object(map),
            _ => Payload::Invalid,
        }
    }

    fn seeded() -> InMemoryStorage {
        InMemoryStorage::with([
            Place::builder().id("P1").name("Loft").build().into(),
            Place::builder().id("P2").name("Cabin").build().into(),
            User::builder().id("U1").build().into(),
            User::builder().id("U2").build().into(),
        ])
    }

    fn make_service() -> (ReviewService<InMemoryStorage>, InMemoryStorage) {
        let storage = seeded();
        (ReviewService::new(storage.clone()), storage)
    }

    async fn create(svc: &ReviewService<InMemoryStorage>, place: &str, text: &str) -> Review {
        svc.create_review(place, body(json!({ "user_id": "U1", "text": text })))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_review_when_place_and_user_exist() {
        let (svc, storage) = make_service();

        let review = svc
            .create_review(
                "P1",
                body(json!({ "user_id": "U1", "text": "Great stay" })),
            )
            .await
            .unwrap();

        assert_eq!(review.place_id.as_str(), "P1");
        assert_eq!(review.user_id.as_str(), "U1");
        assert_eq!(review.text(), Some("Great stay"));

        let fetched = svc.get_review(review.id.as_str()).await.unwrap();
        assert_eq!(fetched, review);
        storage.assert_balanced();
    }

    #[tokio::test]
    async fn should_assign_distinct_ids_per_create() {
        let (svc, _) = make_service();
        let a = create(&svc, "P1", "a").await;
        let b = create(&svc, "P1", "b").await;
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn should_stamp_each_created_review() {
        let (svc, _) = make_service();
        let before = now();

        let a = create(&svc, "P1", "a").await;
        let b = create(&svc, "P1", "b").await;

        for review in [&a, &b] {
            assert!(review.created_at >= before);
            assert!(review.created_at <= now());
            assert_eq!(review.updated_at, review.created_at);
        }
        assert!(b.created_at >= a.created_at);
    }

    #[tokio::test]
    async fn should_keep_created_review_when_close_fails() {
        let (svc, storage) = make_service();
        storage.fail_close.store(true, Ordering::SeqCst);

        let review = create(&svc, "P1", "kept").await;

        storage.fail_close.store(false, Ordering::SeqCst);
        let fetched = svc.get_review(review.id.as_str()).await.unwrap();
        assert_eq!(fetched, review);
        storage.assert_balanced();
    }

    #[tokio::test]
    async fn should_return_not_found_when_place_missing_even_with_bad_body() {
        let (svc, storage) = make_service();
        let result = svc.create_review("nope", Payload::Invalid).await;
        assert!(matches!(result, Err(HbnbError::NotFound(ref e)) if e.entity == "Place"));
        storage.assert_balanced();
    }

    #[tokio::test]
    async fn should_reject_body_that_is_not_json() {
        let (svc, _) = make_service();
        let result = svc.create_review("P1", Payload::Invalid).await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::NotJson))
        ));
    }

    #[tokio::test]
    async fn should_report_missing_user_id_before_missing_text() {
        let (svc, _) = make_service();
        let result = svc.create_review("P1", body(json!({}))).await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("user_id")))
        ));
    }

    #[tokio::test]
    async fn should_report_missing_text_before_checking_user() {
        let (svc, _) = make_service();
        let result = svc
            .create_review("P1", body(json!({ "user_id": "ghost" })))
            .await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("text")))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_missing() {
        let (svc, storage) = make_service();
        let result = svc
            .create_review("P1", body(json!({ "user_id": "nonexistent", "text": "t" })))
            .await;
        assert!(matches!(result, Err(HbnbError::NotFound(ref e)) if e.entity == "User"));
        assert_eq!(storage.snapshot().len(), 4, "nothing must be written");
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_id_is_not_a_string() {
        let (svc, _) = make_service();
        let result = svc
            .create_review("P1", body(json!({ "user_id": 7, "text": "t" })))
            .await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_only_reviews_of_the_place_in_insertion_order() {
        let (svc, _) = make_service();
        let first = create(&svc, "P1", "first").await;
        create(&svc, "P2", "elsewhere").await;
        let second = create(&svc, "P1", "second").await;

        let listed = svc.list_reviews("P1").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn should_list_nothing_for_place_without_reviews() {
        let (svc, _) = make_service();
        assert!(svc.list_reviews("P2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_listing_missing_place() {
        let (svc, storage) = make_service();
        let result = svc.list_reviews("nope").await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
        storage.assert_balanced();
    }

    #[tokio::test]
    async fn should_return_not_found_when_review_missing() {
        let (svc, _) = make_service();
        let result = svc.get_review("nope").await;
        assert!(matches!(result, Err(HbnbError::NotFound(ref e)) if e.entity == "Review"));
    }

    #[tokio::test]
    async fn should_delete_review_and_fail_on_second_delete() {
        let (svc, storage) = make_service();
        let review = create(&svc, "P1", "bye").await;

        svc.delete_review(review.id.as_str()).await.unwrap();

        let result = svc.get_review(review.id.as_str()).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
        let again = svc.delete_review(review.id.as_str()).await;
        assert!(matches!(again, Err(HbnbError::NotFound(_))));
        storage.assert_balanced();
    }

    #[tokio::test]
    async fn should_update_text_and_keep_identity() {
        let earlier = hbnb_domain::time::parse("2017-03-25T02:17:06.000000Z").unwrap();
        let mut review = Review::builder()
            .place_id("P1")
            .user_id("U1")
            .text("old")
            .build()
            .unwrap();
        review.created_at = earlier;
        review.updated_at = earlier;
        let storage = seeded();
        let svc = ReviewService::new(storage.clone());
        let mut session = storage.open().await.unwrap();
        session.stage(review.clone().into());
        session.save().await.unwrap();
        session.close().await.unwrap();

        let updated = svc
            .update_review(review.id.as_str(), body(json!({ "text": "new" })))
            .await
            .unwrap();
        assert_eq!(updated.text(), Some("new"));

        let fetched = svc.get_review(review.id.as_str()).await.unwrap();
        assert_eq!(fetched.text(), Some("new"));
        assert_eq!(fetched.id, review.id);
        assert_eq!(fetched.user_id, review.user_id);
        assert_eq!(fetched.place_id, review.place_id);
        assert_eq!(fetched.created_at, earlier);
        assert!(fetched.updated_at > earlier);
    }

    #[tokio::test]
    async fn should_ignore_immutable_keys_on_update() {
        let (svc, _) = make_service();
        let review = create(&svc, "P1", "t").await;

        let updated = svc
            .update_review(
                review.id.as_str(),
                body(json!({ "user_id": "U2", "place_id": "P2", "id": "other" })),
            )
            .await
            .unwrap();

        assert_eq!(updated.user_id.as_str(), "U1");
        assert_eq!(updated.place_id.as_str(), "P1");
        assert_eq!(updated.id, review.id);
    }

    #[tokio::test]
    async fn should_store_any_value_on_update() {
        let (svc, _) = make_service();
        let review = create(&svc, "P1", "t").await;

        let updated = svc
            .update_review(review.id.as_str(), body(json!({ "text": 5, "extra": null })))
            .await
            .unwrap();

        assert_eq!(updated.attributes["text"], 5);
        assert!(updated.attributes["extra"].is_null());
    }

    #[tokio::test]
    async fn should_check_review_exists_before_body_on_update() {
        let (svc, _) = make_service();
        let missing = svc.update_review("nope", Payload::Invalid).await;
        assert!(matches!(missing, Err(HbnbError::NotFound(_))));

        let review = create(&svc, "P1", "t").await;
        let invalid = svc
            .update_review(review.id.as_str(), Payload::Invalid)
            .await;
        assert!(matches!(
            invalid,
            Err(HbnbError::Validation(ValidationError::NotJson))
        ));
    }

    #[tokio::test]
    async fn should_accept_empty_update_body() {
        let (svc, _) = make_service();
        let review = create(&svc, "P1", "t").await;
        let updated = svc
            .update_review(review.id.as_str(), Payload::Object(Attributes::new()))
            .await
            .unwrap();
        assert_eq!(updated.text(), Some("t"));
    }
}
