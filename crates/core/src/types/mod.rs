//! Domain types for ReadLog
//!
//! - `book`: Book record, status, drafts and patches
//! - `raw`: loosely-typed backend records awaiting normalization
//! - `common`: shared timestamp type

mod book;
mod common;
mod raw;

pub use book::{Book, BookDraft, BookId, BookPatch, BookStatus};
pub use common::Timestamp;
pub use raw::RawBook;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let _id: BookId = BookId::synthesize();
        let _draft: BookDraft = BookDraft::default();
        let _patch: BookPatch = BookPatch::new();
        let _raw: RawBook = RawBook::default();
        let _status: BookStatus = BookStatus::default();
        let _now: Timestamp = Timestamp::now();
    }
}
