//! Wire and domain types for the annotext backend.
//!
//! The backend is a Mongo-backed REST service: records travel with a
//! stringified `_id`, inserts answer with `inserted_id`, and the PATCH
//! endpoints answer with `modified_count`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier for a text record. Opaque and immutable
/// once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextId(pub String);

impl fmt::Display for TextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TextId {
    fn from(s: &str) -> Self {
        TextId(s.to_string())
    }
}

/// A tag attached to a text record: either a plain label or a structured
/// reference to another text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Plain(String),
    TextRef(TextRefTag),
}

/// The structured tag variant, serialized as `{"type": "text", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRefTag {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Tag {
    pub fn plain(label: impl Into<String>) -> Self {
        Tag::Plain(label.into())
    }

    /// A tag referencing another text record by its display value.
    pub fn text_ref(value: impl Into<String>) -> Self {
        Tag::TextRef(TextRefTag {
            kind: "text".to_string(),
            value: value.into(),
        })
    }

    /// The human-readable label regardless of variant.
    pub fn label(&self) -> &str {
        match self {
            Tag::Plain(label) => label,
            Tag::TextRef(tag) => &tag.value,
        }
    }
}

/// A stored annotated text. The client holds cached copies; the backend
/// owns the authoritative record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    #[serde(rename = "_id")]
    pub id: TextId,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Transient tag/text query used to narrow the displayed list. Not
/// persisted anywhere.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub tags: String,
    pub text: String,
}

impl FilterCriteria {
    /// An empty filter means "show all", not "show nothing".
    pub fn is_empty(&self) -> bool {
        self.tags.trim().is_empty() && self.text.trim().is_empty()
    }
}

// -------- Request/response bodies --------

#[derive(Debug, Serialize)]
pub struct AddTextRequest {
    pub text: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
pub struct InsertedResponse {
    pub inserted_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ModifiedResponse {
    pub modified_count: u64,
}

#[derive(Debug, Serialize)]
pub struct NlpRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct NlpResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_wire_rename() {
        let record: TextRecord = serde_json::from_value(json!({
            "_id": "651f3a",
            "text": "hello",
            "tags": ["x", {"type": "text", "value": "other note"}],
        }))
        .unwrap();

        assert_eq!(record.id, TextId::from("651f3a"));
        assert_eq!(record.tags[0], Tag::plain("x"));
        assert_eq!(record.tags[1], Tag::text_ref("other note"));
        assert_eq!(record.tags[1].label(), "other note");
    }

    #[test]
    fn test_record_missing_tags_defaults_empty() {
        let record: TextRecord =
            serde_json::from_value(json!({"_id": "a1", "text": "bare"})).unwrap();
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_text_ref_serializes_with_type_field() {
        let value = serde_json::to_value(Tag::text_ref("note")).unwrap();
        assert_eq!(value, json!({"type": "text", "value": "note"}));

        let value = serde_json::to_value(Tag::plain("rust")).unwrap();
        assert_eq!(value, json!("rust"));
    }

    #[test]
    fn test_empty_filter_means_show_all() {
        assert!(FilterCriteria::default().is_empty());
        assert!(
            FilterCriteria {
                tags: "  ".into(),
                text: "\t".into()
            }
            .is_empty()
        );
        assert!(
            !FilterCriteria {
                tags: "rust".into(),
                text: String::new()
            }
            .is_empty()
        );
    }
}
