//! Review: a user's text about a place.
//!
//! `place_id` and `user_id` are fixed at creation. Everything except the
//! storage-owned keys may be overwritten later through [`Review::merge`];
//! values are taken verbatim, `text` included.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::{self, Attributes};
use crate::error::{HbnbError, ValidationError};
use crate::id::{PlaceId, ReviewId, UserId};
use crate::time::{self, Timestamp};

/// Keys an update never touches.
pub const IMMUTABLE_KEYS: [&str; 5] = ["id", "user_id", "place_id", "created_at", "updated_at"];

/// A review of a [`Place`](crate::place::Place) by a [`User`](crate::user::User).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub place_id: PlaceId,
    pub user_id: UserId,
    #[serde(with = "time::rfc3339")]
    pub created_at: Timestamp,
    #[serde(with = "time::rfc3339")]
    pub updated_at: Timestamp,
    /// `text` plus any other attribute a client supplied.
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Review {
    pub const TEXT: &'static str = "text";

    /// Create a builder for constructing a [`Review`].
    #[must_use]
    pub fn builder() -> ReviewBuilder {
        ReviewBuilder::default()
    }

    /// Build a review from a creation body.
    ///
    /// `place_id` and `user_id` come from the already-resolved records; the
    /// body's own copies, along with any storage-owned keys, are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when `text` is absent.
    pub fn from_payload(
        place_id: PlaceId,
        user_id: UserId,
        mut body: Attributes,
    ) -> Result<Self, HbnbError> {
        attributes::strip_storage_keys(&mut body);
        body.remove("place_id");
        body.remove("user_id");

        body.into_iter()
            .fold(
                Self::builder().place_id(place_id).user_id(user_id),
                |builder, (key, value)| builder.attribute(key, value),
            )
            .build()
    }

    /// The review text, when it is a string.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.attributes.get(Self::TEXT).and_then(Value::as_str)
    }

    /// Overwrite every mutable attribute present in `changes` and bump
    /// `updated_at` to `at`. Immutable and storage-owned keys are skipped.
    pub fn merge(&mut self, changes: Attributes, at: Timestamp) {
        for (key, value) in changes {
            if IMMUTABLE_KEYS.contains(&key.as_str()) || key == attributes::CLASS_KEY {
                continue;
            }
            self.attributes.insert(key, value);
        }
        self.updated_at = at;
    }
}

/// Step-by-step builder for [`Review`].
#[derive(Debug, Default)]
pub struct ReviewBuilder {
    id: Option<ReviewId>,
    place_id: Option<PlaceId>,
    user_id: Option<UserId>,
    attributes: Attributes,
}

impl ReviewBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<ReviewId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn place_id(mut self, place_id: impl Into<PlaceId>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<Value>) -> Self {
        self.attribute(Review::TEXT, text)
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Consume the builder, validate, and return a [`Review`] with fresh
    /// timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `place_id`, `user_id`
    /// or `text` is missing.
    pub fn build(self) -> Result<Review, HbnbError> {
        let place_id = self
            .place_id
            .ok_or(ValidationError::MissingField("place_id"))?;
        let user_id = self.user_id.ok_or(ValidationError::MissingField("user_id"))?;
        if !self.attributes.contains_key(Review::TEXT) {
            return Err(ValidationError::MissingField(Review::TEXT).into());
        }

        let ts = time::now();
        Ok(Review {
            id: self.id.unwrap_or_default(),
            place_id,
            user_id,
            created_at: ts,
            updated_at: ts,
            attributes: self.attributes,
        })
    }
}
