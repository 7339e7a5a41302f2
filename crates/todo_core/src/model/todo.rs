//! Todo item model.
//!
//! # Responsibility
//! - Define the record persisted under the `todos` storage key.
//! - Provide title normalization and record validation.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - `created_at` is captured at creation with millisecond precision and never
//!   changes.
//! - `title` is trimmed and non-empty for every valid item.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque todo identifier.
///
/// Fresh ids are UUID v4 text, but any non-empty text loaded from storage is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation failure for a todo record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyId,
    EmptyTitle { id: TodoId },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "todo id cannot be empty"),
            Self::EmptyTitle { id } => write!(f, "todo `{id}` has an empty title"),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical todo record.
///
/// Field names serialize in camelCase to keep the stored layout
/// `{ id, title, completed, createdAt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    #[serde(with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a pending todo from raw user input.
    ///
    /// Returns `None` when the normalized title is empty.
    pub fn new(title: &str) -> Option<Self> {
        let title = normalize_title(title)?;
        Some(Self {
            id: TodoId::generate(),
            title,
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        })
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty.
    /// - `EmptyTitle` when `title` is empty after trimming.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.as_str().is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        if normalize_title(&self.title).is_none() {
            return Err(TodoValidationError::EmptyTitle {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

/// Trims surrounding whitespace and rejects empty results.
///
/// Whitespace here is the ECMAScript `trim` set: Unicode white space plus
/// U+FEFF, minus U+0085.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(is_title_whitespace);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_title_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// RFC 3339 text with millisecond precision, e.g. `2026-10-16T08:30:00.123Z`.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|err| serde::de::Error::custom(format!("invalid createdAt `{text}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, TodoId, TodoItem, TodoValidationError};

    #[test]
    fn normalize_title_trims_and_rejects_blank() {
        assert_eq!(normalize_title("  Buy milk \n"), Some("Buy milk".to_string()));
        assert_eq!(normalize_title(""), None);
        assert_eq!(normalize_title(" \t\r\n "), None);
    }

    #[test]
    fn normalize_title_strips_byte_order_mark_but_keeps_next_line() {
        assert_eq!(normalize_title("\u{FEFF}"), None);
        assert_eq!(normalize_title(" \u{FEFF} "), None);
        assert_eq!(
            normalize_title("\u{FEFF}Buy milk\u{FEFF}"),
            Some("Buy milk".to_string())
        );
        assert_eq!(normalize_title("\u{85}"), Some("\u{85}".to_string()));
        assert!(TodoItem::new("\u{FEFF}").is_none());
    }

    #[test]
    fn new_item_starts_pending_with_fresh_id() {
        let first = TodoItem::new("first").unwrap();
        let second = TodoItem::new("second").unwrap();

        assert!(!first.completed);
        assert!(first.is_pending());
        assert_ne!(first.id, second.id);
        assert!(TodoItem::new("   ").is_none());
    }

    #[test]
    fn serialized_record_uses_camel_case_and_millisecond_timestamp() {
        let item = TodoItem::new("Persistent task").unwrap();
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], item.id.as_str());
        assert_eq!(value["title"], "Persistent task");
        assert_eq!(value["completed"], false);
        let created_at = value["createdAt"].as_str().unwrap();
        assert!(created_at.ends_with('Z'));
        assert_eq!(created_at.split('.').nth(1).map(str::len), Some(4));
    }

    #[test]
    fn deserializes_foreign_id_and_offset_timestamp() {
        let item: TodoItem = serde_json::from_str(
            r#"{"id":"test-id-1","title":"Existing task","completed":true,"createdAt":"2024-03-01T10:00:00+02:00"}"#,
        )
        .unwrap();

        assert_eq!(item.id, TodoId::from("test-id-1"));
        assert!(item.completed);
        assert_eq!(item.created_at.to_rfc3339(), "2024-03-01T08:00:00+00:00");
    }

    #[test]
    fn validate_rejects_blank_title_and_empty_id() {
        let mut item = TodoItem::new("ok").unwrap();
        item.title = " \u{FEFF} ".to_string();
        assert_eq!(
            item.validate(),
            Err(TodoValidationError::EmptyTitle {
                id: item.id.clone()
            })
        );

        item.title = "ok".to_string();
        item.id = TodoId::from("");
        assert_eq!(item.validate(), Err(TodoValidationError::EmptyId));
    }
}
