//! Book domain models

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque unique identifier for a book
///
/// Backends either assign their own ids or accept client-supplied ones; in
/// the latter case the id is synthesized from the current time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Wraps an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesizes an id from the current Unix time in milliseconds
    pub fn synthesize() -> Self {
        Self(Timestamp::now().as_millis().to_string())
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty id
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Reading state of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookStatus {
    /// Saved to read later
    #[default]
    #[serde(rename = "watchlist")]
    Watchlist,
    /// Currently reading
    #[serde(rename = "in-progress")]
    InProgress,
    /// Finished
    #[serde(rename = "done")]
    Done,
}

impl BookStatus {
    /// All statuses in display order
    pub const ALL: [BookStatus; 3] = [BookStatus::Watchlist, BookStatus::InProgress, BookStatus::Done];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Watchlist => "watchlist",
            BookStatus::InProgress => "in-progress",
            BookStatus::Done => "done",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Watchlist => "Watch Later",
            BookStatus::InProgress => "In Progress",
            BookStatus::Done => "Done",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "watchlist" => Ok(BookStatus::Watchlist),
            "in-progress" => Ok(BookStatus::InProgress),
            "done" => Ok(BookStatus::Done),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Canonical in-memory book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Free-text classification; no closed set is enforced
    pub genre: String,
    pub status: BookStatus,
    pub summary: String,
    /// Cover URL, empty when unknown
    pub image: String,
    /// Owner, present only under the authenticated backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Book {
    /// Builds a full record from a draft, stamping both timestamps with `now`
    pub fn from_draft(id: BookId, draft: &BookDraft, now: Timestamp) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            author: draft.author.trim().to_string(),
            genre: draft.genre.clone(),
            status: draft.status,
            summary: draft.summary.clone(),
            image: draft.image.clone(),
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the fields present in `patch` and refreshes `updated_at`
    ///
    /// `created_at` and `id` are never touched.
    pub fn apply(&mut self, patch: &BookPatch, now: Timestamp) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(author) = &patch.author {
            self.author = author.trim().to_string();
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(summary) = &patch.summary {
            self.summary = summary.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        self.updated_at = now;
    }

    /// Undoes `patch`, taking the old values from `snapshot`
    ///
    /// A field is restored only while it still holds what `patch` wrote, so a
    /// later edit to the same record survives.
    pub fn revert(&mut self, patch: &BookPatch, snapshot: &Book) {
        if patch.title.as_deref().is_some_and(|t| t.trim() == self.title) {
            self.title = snapshot.title.clone();
        }
        if patch.author.as_deref().is_some_and(|a| a.trim() == self.author) {
            self.author = snapshot.author.clone();
        }
        if patch.genre.as_ref() == Some(&self.genre) {
            self.genre = snapshot.genre.clone();
        }
        if patch.status == Some(self.status) {
            self.status = snapshot.status;
        }
        if patch.summary.as_ref() == Some(&self.summary) {
            self.summary = snapshot.summary.clone();
        }
        if patch.image.as_ref() == Some(&self.image) {
            self.image = snapshot.image.clone();
        }
        if patch.updated_at == Some(self.updated_at) {
            self.updated_at = snapshot.updated_at;
        }
    }
}

/// User-supplied fields for a new book
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub status: BookStatus,
    pub summary: String,
    pub image: String,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: BookStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Partial field set for an edit; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Modification time sent along with the patch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_status(mut self, status: BookStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Trims title and author the way [`Book::apply`] stores them
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self.author = self.author.map(|a| a.trim().to_string());
        self
    }

    /// Returns a copy carrying `updated_at`
    pub fn stamped(&self, now: Timestamp) -> Self {
        Self {
            updated_at: Some(now),
            ..self.clone()
        }
    }

    /// Returns true when no book field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.status.is_none()
            && self.summary.is_none()
            && self.image.is_none()
    }
}
