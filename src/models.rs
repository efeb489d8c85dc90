//! Data models for quillsync
//!
//! Defines the local note representation, the remote document representation,
//! the tagged input type for note creation, and operation statuses.
//!
//! Text is canonical UTF-8 (`String`) everywhere; serde fixes the encoding at
//! the system boundary, so no runtime normalization branching is needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note as seen by the local application
///
/// Fields are optional because notes appear in partial shapes: list results
/// and quiet-update responses omit `content`, and a not-yet-created draft has
/// no `key`. Absent fields are omitted from the serialized form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Stable identifier; absent until the note is first written remotely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Note body; absent in list results and quiet-update responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tags in caller order; never deduplicated or sorted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Set once at creation, immutable afterwards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub createdate: Option<DateTime<Utc>>,
    /// Updated on every content-affecting write of an existing note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifydate: Option<DateTime<Utc>>,
    /// Set on every successful write, whether or not content changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syncdate: Option<DateTime<Utc>>,
    /// Monotonic per-key sequence number derived from the remote revision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syncnum: Option<u64>,
}

/// Input for creating a brand-new note
///
/// Either the full content as plain text, or a structured form that can also
/// carry tags. A note with no content at all is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum NewNote {
    /// Raw text becomes the full content of a keyless, tagless note
    PlainText(String),
    /// Structured note-like input
    Structured {
        content: String,
        tags: Option<Vec<String>>,
    },
}

impl NewNote {
    /// Build the keyless draft note that enters the update path
    pub fn into_draft(self) -> Note {
        match self {
            NewNote::PlainText(content) => Note {
                content: Some(content),
                ..Note::default()
            },
            NewNote::Structured { content, tags } => Note {
                content: Some(content),
                tags,
                ..Note::default()
            },
        }
    }
}

impl From<&str> for NewNote {
    fn from(s: &str) -> Self {
        NewNote::PlainText(s.to_string())
    }
}

impl From<String> for NewNote {
    fn from(s: String) -> Self {
        NewNote::PlainText(s)
    }
}

/// Outcome of a caller-facing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Operation succeeded
    Ok,
    /// Requested key is absent remotely (a normal negative result)
    NotFound,
    /// Operation succeeded, but a revision conflict was resolved on the way
    Conflicted,
}

impl Status {
    /// Numeric code used by the caller-facing API surface
    ///
    /// `0` success, `-1` not-found, `1` succeeded-with-conflict.
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::NotFound => -1,
            Status::Conflicted => 1,
        }
    }
}

/// A note as stored in the remote revisioned document store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteDocument {
    /// Unique identifier, stable for the note's lifetime
    #[serde(rename = "_id")]
    pub id: String,
    /// Opaque revision token issued by the store on each successful write
    ///
    /// Omitted on a write when no prior revision is known; that means "no
    /// known precondition", not "must not already exist".
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub createdate: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifydate: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syncdate: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_draft() {
        let draft = NewNote::PlainText("hello".to_string()).into_draft();
        assert!(draft.key.is_none());
        assert_eq!(draft.content.as_deref(), Some("hello"));
        assert!(draft.tags.is_none());
    }

    #[test]
    fn test_structured_draft() {
        let draft = NewNote::Structured {
            content: "body".to_string(),
            tags: Some(vec!["tag1".to_string(), "tag2".to_string()]),
        }
        .into_draft();
        assert!(draft.key.is_none());
        assert_eq!(draft.content.as_deref(), Some("body"));
        assert_eq!(draft.tags, Some(vec!["tag1".to_string(), "tag2".to_string()]));
    }

    #[test]
    fn test_new_note_from_str() {
        let input: NewNote = "quick note".into();
        assert_eq!(input, NewNote::PlainText("quick note".to_string()));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::NotFound.code(), -1);
        assert_eq!(Status::Conflicted.code(), 1);
    }

    #[test]
    fn test_note_omits_absent_fields() {
        let note = Note {
            key: Some("abc".to_string()),
            syncnum: Some(3),
            ..Note::default()
        };
        let json = serde_json::to_value(&note).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("key"));
        assert!(obj.contains_key("syncnum"));
        assert!(!obj.contains_key("content"));
        assert!(!obj.contains_key("tags"));
    }

    #[test]
    fn test_document_field_renames() {
        let doc = RemoteDocument {
            id: "abc".to_string(),
            rev: Some("1-deadbeef".to_string()),
            content: Some("text".to_string()),
            tags: None,
            createdate: Some(Utc::now()),
            modifydate: None,
            syncdate: Some(Utc::now()),
        };
        let json = serde_json::to_value(&doc).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["_id"], "abc");
        assert_eq!(obj["_rev"], "1-deadbeef");
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("modifydate"));
    }

    #[test]
    fn test_document_omits_missing_rev() {
        let doc = RemoteDocument {
            id: "abc".to_string(),
            rev: None,
            content: None,
            tags: None,
            createdate: None,
            modifydate: None,
            syncdate: None,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(!json.as_object().unwrap().contains_key("_rev"));
    }

    #[test]
    fn test_note_serialization_round_trip() {
        let note = Note {
            key: Some("abc".to_string()),
            content: Some("Some utf8 ćontent".to_string()),
            tags: Some(vec!["tag1".to_string()]),
            createdate: Some(Utc::now()),
            modifydate: Some(Utc::now()),
            syncdate: Some(Utc::now()),
            syncnum: Some(1),
        };
        let json = serde_json::to_string(&note).unwrap();
        let deserialized: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(note, deserialized);
    }
}
