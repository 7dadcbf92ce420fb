//! Document <-> Position conversion
//!
//! Persisted layout per document: `{ name, description, parentId }`,
//! with the document id kept outside the fields.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{NewPosition, Position};

/// Plain JSON fields of a document
pub type Fields = Map<String, Value>;

/// A document as returned by a `DocumentStore`
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[derive(Deserialize)]
struct StoredPosition {
    name: String,
    description: String,
    #[serde(rename = "parentId", default)]
    parent_id: Option<String>,
}

/// Fields written for a position (create and update send the same set)
pub fn encode_position(position: &NewPosition) -> Fields {
    let mut fields = Map::new();
    fields.insert("name".into(), Value::String(position.name.clone()));
    fields.insert(
        "description".into(),
        Value::String(position.description.clone()),
    );
    fields.insert(
        "parentId".into(),
        position
            .parent_id
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null),
    );
    fields
}

/// Decode a stored document into a Position
///
/// An empty `parentId` string is read as a root.
pub fn decode_position(document: &Document) -> Result<Position, String> {
    let stored: StoredPosition = serde_json::from_value(Value::Object(document.fields.clone()))
        .map_err(|e| format!("document {}: {}", document.id, e))?;

    Ok(Position {
        id: document.id.clone(),
        name: stored.name,
        description: stored.description,
        parent_id: stored.parent_id.filter(|p| !p.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_encode_root_writes_null_parent() {
        let encoded = encode_position(&NewPosition::root("CEO", "Chief"));
        assert_eq!(
            Value::Object(encoded),
            json!({"name": "CEO", "description": "Chief", "parentId": null})
        );
    }

    #[test]
    fn test_decode_missing_parent_is_root() {
        let doc = Document::new("a", fields(json!({"name": "CEO", "description": "Chief"})));
        let pos = decode_position(&doc).unwrap();
        assert_eq!(pos.id, "a");
        assert!(pos.is_root());
    }

    #[test]
    fn test_decode_empty_parent_is_root() {
        let doc = Document::new(
            "b",
            fields(json!({"name": "CFO", "description": "Money", "parentId": ""})),
        );
        assert_eq!(decode_position(&doc).unwrap().parent_id, None);
    }

    #[test]
    fn test_decode_rejects_missing_name() {
        let doc = Document::new("c", fields(json!({"description": "No name"})));
        let err = decode_position(&doc).unwrap_err();
        assert!(err.starts_with("document c:"));
    }
}
