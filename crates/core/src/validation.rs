//! Field limits and the duplicate-detection key

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Book, BookDraft, BookPatch};

/// Maximum title length in characters, after trimming
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum author length in characters, after trimming
pub const MAX_AUTHOR_LEN: usize = 100;

/// Checks title and author against the field limits
pub fn validate_fields(title: &str, author: &str) -> ValidationResult<()> {
    validate_title(title)?;
    validate_author(author)
}

pub fn validate_title(title: &str) -> ValidationResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong { len, max: MAX_TITLE_LEN });
    }
    Ok(())
}

pub fn validate_author(author: &str) -> ValidationResult<()> {
    let len = author.trim().chars().count();
    if len > MAX_AUTHOR_LEN {
        return Err(ValidationError::AuthorTooLong { len, max: MAX_AUTHOR_LEN });
    }
    Ok(())
}

/// Validates a draft before it is turned into a record
pub fn validate_draft(draft: &BookDraft) -> ValidationResult<()> {
    validate_fields(&draft.title, &draft.author)
}

/// Validates only the fields a patch actually sets
pub fn validate_patch(patch: &BookPatch) -> ValidationResult<()> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(author) = &patch.author {
        validate_author(author)?;
    }
    Ok(())
}

/// Normalized `(title, author, genre)` triple used for duplicate detection
///
/// Title and author are trimmed and lower-cased; genre is trimmed and
/// compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    title: String,
    author: String,
    genre: String,
}

impl DuplicateKey {
    pub fn of(title: &str, author: &str, genre: &str) -> Self {
        Self {
            title: title.trim().to_lowercase(),
            author: author.trim().to_lowercase(),
            genre: genre.trim().to_string(),
        }
    }

    pub fn of_book(book: &Book) -> Self {
        Self::of(&book.title, &book.author, &book.genre)
    }

    pub fn of_draft(draft: &BookDraft) -> Self {
        Self::of(&draft.title, &draft.author, &draft.genre)
    }

    /// Key the book would have after `patch` is applied
    pub fn of_patched(book: &Book, patch: &BookPatch) -> Self {
        Self::of(
            patch.title.as_deref().unwrap_or(&book.title),
            patch.author.as_deref().unwrap_or(&book.author),
            patch.genre.as_deref().unwrap_or(&book.genre),
        )
    }

    /// Returns true if any book in `books` shares this key
    pub fn matches_any<'a>(&self, mut books: impl Iterator<Item = &'a Book>) -> bool {
        books.any(|b| &DuplicateKey::of_book(b) == self)
    }
}
