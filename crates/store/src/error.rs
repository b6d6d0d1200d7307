// crates/store/src/error.rs
//! Error types for collection operations

use readlog_core::{BookId, ValidationError};
use readlog_persistence::AdapterError;
use std::fmt;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// What a failed persistence call left behind in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalEffect {
    /// The optimistic change stays applied
    Retained,
    /// The pre-mutation snapshot was restored
    RolledBack,
    /// Nothing was inserted
    Discarded,
}

impl fmt::Display for LocalEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocalEffect::Retained => "local change kept",
            LocalEffect::RolledBack => "local change rolled back",
            LocalEffect::Discarded => "nothing stored locally",
        };
        f.write_str(s)
    }
}

/// Coarse failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    Unauthenticated,
    NotFound,
    Transport,
}

/// Outcome of a failed store operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// Field limits violated; nothing changed
    #[error("Invalid book: {0}")]
    Validation(#[from] ValidationError),

    /// Same title, author and genre already collected; nothing changed
    #[error("\"{title}\" is already in your collection")]
    Duplicate { title: String },

    /// Mutation attempted with no signed-in user; nothing changed
    #[error("Sign in to change your collection")]
    Unauthenticated,

    /// No local record with this id; nothing changed
    #[error("No book with id {0}")]
    NotFound(BookId),

    /// Backend call failed after local state was touched
    #[error("Could not save ({local}): {source}")]
    Transport {
        #[source]
        source: AdapterError,
        local: LocalEffect,
    },

    /// Fetch failed; the collection was left as it was
    #[error("Could not load books: {0}")]
    Load(#[source] AdapterError),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::Duplicate { .. } => ErrorKind::Duplicate,
            StoreError::Unauthenticated => ErrorKind::Unauthenticated,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            // the backend saw the session lapse mid-flight
            StoreError::Transport { source, .. } | StoreError::Load(source)
                if source.is_unauthenticated() =>
            {
                ErrorKind::Unauthenticated
            }
            StoreError::Transport { .. } | StoreError::Load(_) => ErrorKind::Transport,
        }
    }

    /// In-memory effect of a failed backend write, if one was attempted
    pub fn local_effect(&self) -> Option<LocalEffect> {
        match self {
            StoreError::Transport { local, .. } => Some(*local),
            _ => None,
        }
    }
}
