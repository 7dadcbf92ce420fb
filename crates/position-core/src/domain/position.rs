//! Position Entity
//!
//! A node in the organizational hierarchy (single parent).

use serde::{Deserialize, Serialize};

/// A position as held in the flat list
///
/// `id` is assigned by the remote store and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Parent position ID (None = root)
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

/// A position that has not been stored yet (no id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPosition {
    pub name: String,
    pub description: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl Position {
    /// Attach a store-assigned id to a new position
    pub fn from_new(id: impl Into<String>, new: NewPosition) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            description: new.description,
            parent_id: new.parent_id,
        }
    }

    /// Check if this is a root position (no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Same position under a different parent
    pub fn reparented(&self, parent_id: Option<String>) -> Self {
        Self {
            parent_id,
            ..self.clone()
        }
    }

    /// The mutable field set, as sent on update
    pub fn fields(&self) -> NewPosition {
        NewPosition {
            name: self.name.clone(),
            description: self.description.clone(),
            parent_id: self.parent_id.clone(),
        }
    }
}

impl NewPosition {
    pub fn root(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parent_id: None,
        }
    }

    pub fn child(
        name: impl Into<String>,
        description: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parent_id: Some(parent_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_keeps_fields() {
        let pos = Position::from_new("abc", NewPosition::child("CFO", "Finance", "ceo"));
        assert_eq!(pos.id, "abc");
        assert_eq!(pos.name, "CFO");
        assert_eq!(pos.parent_id.as_deref(), Some("ceo"));
        assert!(!pos.is_root());
    }

    #[test]
    fn test_reparented_keeps_identity() {
        let pos = Position::from_new("cto", NewPosition::child("CTO", "Tech", "ceo"));
        let moved = pos.reparented(None);
        assert_eq!(moved.id, "cto");
        assert_eq!(moved.name, "CTO");
        assert!(moved.is_root());
    }

    #[test]
    fn test_serializes_parent_id_in_camel_case() {
        let pos = Position::from_new("ceo", NewPosition::root("CEO", "Chief"));
        let json = serde_json::to_value(&pos).unwrap();
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert!(json.get("parent_id").is_none());
    }
}
