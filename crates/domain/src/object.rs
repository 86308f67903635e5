//! The envelope storage backends exchange with the application layer.
//!
//! Sessions address records by ([`EntityKind`], id) and hand back an
//! [`Object`]. Typed code converts with [`Model`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::place::Place;
use crate::review::Review;
use crate::user::User;

/// The kinds of record the storage layer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Place,
    Review,
    User,
}

impl EntityKind {
    /// Every kind, in a stable order.
    pub const ALL: [Self; 3] = [Self::Place, Self::Review, Self::User];

    /// Class name, as used in storage keys (`Place`).
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Place => "Place",
            Self::Review => "Review",
            Self::User => "User",
        }
    }

    /// Plural, lower-case collection name (`places`).
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Place => "places",
            Self::Review => "reviews",
            Self::User => "users",
        }
    }

    /// Storage key for a record of this kind: `<Class>.<id>`.
    #[must_use]
    pub fn key(self, id: &str) -> String {
        format!("{}.{id}", self.class_name())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Returned when a class name does not match any [`EntityKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown class {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Any persisted record.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Place(Place),
    Review(Review),
    User(User),
}

impl Object {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Place(_) => EntityKind::Place,
            Self::Review(_) => EntityKind::Review,
            Self::User(_) => EntityKind::User,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Place(place) => place.id.as_str(),
            Self::Review(review) => review.id.as_str(),
            Self::User(user) => user.id.as_str(),
        }
    }

    /// Storage key: `<Class>.<id>`.
    #[must_use]
    pub fn key(&self) -> String {
        self.kind().key(self.id())
    }

    /// Flatten into an attribute map (`id`, timestamps and all attributes).
    ///
    /// # Errors
    ///
    /// Propagates serialization failures.
    pub fn to_attributes(&self) -> Result<Attributes, serde_json::Error> {
        let value = match self {
            Self::Place(place) => serde_json::to_value(place)?,
            Self::Review(review) => serde_json::to_value(review)?,
            Self::User(user) => serde_json::to_value(user)?,
        };
        match value {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "record serialized to {other} instead of an object"
            ))),
        }
    }

    /// Rebuild a record of `kind` from its attribute map.
    ///
    /// # Errors
    ///
    /// Fails when required fields are missing or malformed.
    pub fn from_attributes(kind: EntityKind, map: Attributes) -> Result<Self, serde_json::Error> {
        let value = serde_json::Value::Object(map);
        Ok(match kind {
            EntityKind::Place => Self::Place(serde_json::from_value(value)?),
            EntityKind::Review => Self::Review(serde_json::from_value(value)?),
            EntityKind::User => Self::User(serde_json::from_value(value)?),
        })
    }
}

/// A concrete record type that can travel inside an [`Object`].
pub trait Model: Into<Object> + Send + Sized + 'static {
    const KIND: EntityKind;

    /// Unwrap an object of the matching kind.
    fn from_object(object: Object) -> Option<Self>;
}

macro_rules! impl_model {
    ($ty:ident) => {
        impl From<$ty> for Object {
            fn from(value: $ty) -> Self {
                Self::$ty(value)
            }
        }

        impl Model for $ty {
            const KIND: EntityKind = EntityKind::$ty;

            fn from_object(object: Object) -> Option<Self> {
                match object {
                    Object::$ty(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_model!(Place);
impl_model!(Review);
impl_model!(User);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_class_dot_id_keys() {
        assert_eq!(EntityKind::Review.key("abc"), "Review.abc");
        let place = Place::builder().id("P1").build();
        assert_eq!(Object::from(place).key(), "Place.P1");
    }

    #[test]
    fn should_parse_class_names() {
        assert_eq!("User".parse::<EntityKind>(), Ok(EntityKind::User));
        assert!("State".parse::<EntityKind>().is_err());
    }

    #[test]
    fn should_unwrap_only_matching_kind() {
        let object = Object::from(User::builder().id("U1").build());
        assert!(Place::from_object(object.clone()).is_none());
        assert_eq!(User::from_object(object).unwrap().id.as_str(), "U1");
    }

    #[test]
    fn should_rebuild_object_from_attributes() {
        let review = Review::builder()
            .place_id("P1")
            .user_id("U1")
            .text("hi")
            .build()
            .unwrap();
        let object = Object::from(review);

        let map = object.to_attributes().unwrap();
        assert_eq!(map["text"], "hi");

        let rebuilt = Object::from_attributes(EntityKind::Review, map).unwrap();
        assert_eq!(rebuilt, object);
    }

    #[test]
    fn should_fail_to_rebuild_review_without_place_id() {
        let mut map = Attributes::new();
        map.insert("id".to_string(), "R1".into());
        assert!(Object::from_attributes(EntityKind::Review, map).is_err());
    }
}
