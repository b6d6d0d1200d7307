//! Loosely-typed record as returned by a backend

use crate::types::Book;
use serde::{Deserialize, Deserializer, Serialize};

/// A persisted book record before normalization
///
/// Every field is optional and deserializing never fails on a field's type:
/// ids and timestamps accept numbers, and a text field holding anything but a
/// string reads as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBook {
    #[serde(deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "text_only", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "text_only", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(deserialize_with = "text_only", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(deserialize_with = "text_only", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(deserialize_with = "text_only", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "text_only", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(deserialize_with = "text_only", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<&Book> for RawBook {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id.to_string()),
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
            genre: Some(book.genre.clone()),
            status: Some(book.status.as_str().to_string()),
            summary: Some(book.summary.clone()),
            image: Some(book.image.clone()),
            user_id: book.user_id.clone(),
            created_at: Some(book.created_at.to_iso()),
            updated_at: Some(book.updated_at.to_iso()),
        }
    }
}

impl RawBook {
    /// Reads one element of a fetched list; `None` for anything but an object
    pub fn from_value(value: serde_json::Value) -> Option<RawBook> {
        if !value.is_object() {
            log::warn!("Skipping non-object record: {}", value);
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Fills every field missing here from `fallback`
    pub fn or(self, fallback: RawBook) -> RawBook {
        RawBook {
            id: self.id.or(fallback.id),
            title: self.title.or(fallback.title),
            author: self.author.or(fallback.author),
            genre: self.genre.or(fallback.genre),
            status: self.status.or(fallback.status),
            summary: self.summary.or(fallback.summary),
            image: self.image.or(fallback.image),
            user_id: self.user_id.or(fallback.user_id),
            created_at: self.created_at.or(fallback.created_at),
            updated_at: self.updated_at.or(fallback.updated_at),
        }
    }
}

/// Accepts strings, numbers, or null for id-like fields
fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Keeps strings; numbers, objects and the like read as absent
fn text_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}
