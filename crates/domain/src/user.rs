//! User: the author of a review.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::Attributes;
use crate::id::UserId;
use crate::time::{self, Timestamp};

/// A registered user. Only its existence matters to the review API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(with = "time::rfc3339")]
    pub created_at: Timestamp,
    #[serde(with = "time::rfc3339")]
    pub updated_at: Timestamp,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    attributes: Attributes,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<UserId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn email(self, email: impl Into<String>) -> Self {
        self.attribute("email", email.into())
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> User {
        let ts = time::now();
        User {
            id: self.id.unwrap_or_default(),
            created_at: ts,
            updated_at: ts,
            attributes: self.attributes,
        }
    }
}
