//! Encoding of the in-memory record map to and from the JSON document.

use std::collections::BTreeMap;

use serde_json::Value;

use hbnb_domain::attributes::{Attributes, CLASS_KEY};
use hbnb_domain::object::{EntityKind, Object};

use crate::error::StorageError;

/// Records keyed `<Class>.<id>`.
pub(crate) type Records = BTreeMap<String, Object>;

/// Decode a document. An empty (or whitespace-only) file holds no records.
pub(crate) fn decode(bytes: &[u8]) -> Result<Records, StorageError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Records::new());
    }

    let Value::Object(root) = serde_json::from_slice::<Value>(bytes)? else {
        return Err(StorageError::NotADocument);
    };

    let mut records = Records::new();
    for (key, value) in root {
        let Value::Object(mut map) = value else {
            return Err(StorageError::NotARecord { key });
        };
        let kind = record_kind(&key, &mut map)?;
        let object = Object::from_attributes(kind, map)?;
        records.insert(object.key(), object);
    }
    Ok(records)
}

/// Encode records into a document, tagging each with its class.
pub(crate) fn encode(records: &Records) -> Result<Vec<u8>, StorageError> {
    let mut root = Attributes::new();
    for (key, object) in records {
        let mut map = object.to_attributes()?;
        map.insert(CLASS_KEY.to_string(), object.kind().class_name().into());
        root.insert(key.clone(), Value::Object(map));
    }
    Ok(serde_json::to_vec(&Value::Object(root))?)
}

/// The class comes from the `__class__` marker, falling back to the key prefix.
fn record_kind(key: &str, map: &mut Attributes) -> Result<EntityKind, StorageError> {
    let class = match map.remove(CLASS_KEY) {
        Some(Value::String(class)) => class,
        _ => key.split_once('.').map_or(key, |(class, _)| class).to_string(),
    };
    Ok(class.parse()?)
}
