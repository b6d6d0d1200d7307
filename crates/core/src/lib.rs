//! ReadLog core domain
//!
//! Book records, the raw-record normalizer and the field rules every
//! mutation is checked against before it reaches a backend.

pub mod error;
pub mod normalizer;
pub mod types;
pub mod validation;

pub use error::{ValidationError, ValidationResult};
pub use normalizer::{normalize, normalize_all, normalize_at};
pub use types::{Book, BookDraft, BookId, BookPatch, BookStatus, RawBook, Timestamp};
pub use validation::{DuplicateKey, MAX_AUTHOR_LEN, MAX_TITLE_LEN};
