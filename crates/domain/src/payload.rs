//! Request payloads.
//!
//! A body is parsed as soon as it arrives but a parse failure is only
//! reported when a use-case asks for the object, so that existence checks
//! that precede it keep their place in the validation order.

use serde_json::Value;

use crate::attributes::Attributes;
use crate::error::ValidationError;

/// A request body that either is a JSON object or is not.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body decoded to a JSON object.
    Object(Attributes),
    /// Missing, malformed, non-object, or not declared as JSON.
    Invalid,
}

impl Payload {
    /// Decode raw bytes. Anything other than a JSON object is [`Payload::Invalid`].
    #[must_use]
    pub fn from_json_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Self::Object(map),
            _ => Self::Invalid,
        }
    }

    /// Take the decoded object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotJson`] for an invalid payload.
    pub fn into_object(self) -> Result<Attributes, ValidationError> {
        match self {
            Self::Object(map) => Ok(map),
            Self::Invalid => Err(ValidationError::NotJson),
        }
    }
}
