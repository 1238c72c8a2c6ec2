//! Opaque identifiers for board entities.
//!
//! The backend renders ids as integers in markup and JSON, but nothing on the
//! client relies on that: ids are compared and echoed back verbatim. Both
//! `"42"` and `42` deserialize to the same id.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
        }
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Create an id from its textual form.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The id as sent to and received from the backend.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id.to_string())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }
    };
}

entity_id!(
    /// Identifier of a task (a draggable card).
    TaskId
);
entity_id!(
    /// Identifier of a list (a board column holding tasks).
    ListId
);
entity_id!(
    /// Identifier of a board.
    BoardId
);
entity_id!(
    /// Identifier of a comment.
    CommentId
);
entity_id!(
    /// Identifier of an activity log entry.
    ActivityId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_string_ids_are_equal() {
        let from_int: TaskId = serde_json::from_str("42").unwrap();
        let from_str: TaskId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(from_int.as_str(), "42");
    }

    #[test]
    fn test_negative_id() {
        let id: ListId = serde_json::from_str("-3").unwrap();
        assert_eq!(id.to_string(), "-3");
    }

    #[test]
    fn test_serializes_as_string() {
        let id = BoardId::from(7u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }

    #[test]
    fn test_rejects_non_scalar() {
        assert!(serde_json::from_str::<TaskId>("[1]").is_err());
    }
}
