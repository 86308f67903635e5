//! Free-form record attributes.
//!
//! Every record keeps the keys it does not model explicitly in an
//! [`Attributes`] map. Values are stored exactly as supplied.

use serde_json::Value;

/// Flat attribute map, serialized inline next to a record's typed fields.
pub type Attributes = serde_json::Map<String, Value>;

/// Key under which the file backend records a record's class name.
pub const CLASS_KEY: &str = "__class__";

/// Keys owned by the storage layer: never copied from a request body.
pub const STORAGE_KEYS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_KEY];

/// Remove storage-owned keys from `attributes`.
pub fn strip_storage_keys(attributes: &mut Attributes) {
    for key in STORAGE_KEYS {
        attributes.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_strip_only_storage_keys() {
        let Value::Object(mut attrs) = json!({
            "id": "x",
            "created_at": "t",
            "updated_at": "t",
            "__class__": "Review",
            "text": "kept",
        }) else {
            unreachable!()
        };

        strip_storage_keys(&mut attrs);

        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["text"], "kept");
    }
}
