//! Place: a listing that reviews are written about.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::Attributes;
use crate::id::PlaceId;
use crate::time::{self, Timestamp};

/// A rentable place. Its reviews are reached through the storage session,
/// the place never holds them itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    #[serde(with = "time::rfc3339")]
    pub created_at: Timestamp,
    #[serde(with = "time::rfc3339")]
    pub updated_at: Timestamp,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Place {
    /// Create a builder for constructing a [`Place`].
    #[must_use]
    pub fn builder() -> PlaceBuilder {
        PlaceBuilder::default()
    }
}

/// Step-by-step builder for [`Place`].
#[derive(Debug, Default)]
pub struct PlaceBuilder {
    id: Option<PlaceId>,
    attributes: Attributes,
}

impl PlaceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<PlaceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.attribute("name", name.into())
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Consume the builder, stamping both timestamps with the current time.
    #[must_use]
    pub fn build(self) -> Place {
        let ts = time::now();
        Place {
            id: self.id.unwrap_or_default(),
            created_at: ts,
            updated_at: ts,
            attributes: self.attributes,
        }
    }
}
