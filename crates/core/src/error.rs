//! Error types for book field validation

use thiserror::Error;

/// Result type for validation checks
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A book field failed its bounds check
///
/// Raised before any state mutation or persistence call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty after trimming
    #[error("Title is required")]
    EmptyTitle,

    /// Title exceeds the character limit after trimming
    #[error("Title too long ({len} chars, max {max})")]
    TitleTooLong { len: usize, max: usize },

    /// Author exceeds the character limit after trimming
    #[error("Author name too long ({len} chars, max {max})")]
    AuthorTooLong { len: usize, max: usize },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle | ValidationError::TitleTooLong { .. } => "title",
            ValidationError::AuthorTooLong { .. } => "author",
        }
    }
}
