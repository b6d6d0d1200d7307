// crates/catalog/src/traits.rs
//! Catalog source contract and result shape

use crate::error::CatalogResult;
use async_trait::async_trait;
use readlog_core::{BookDraft, BookStatus};
use serde::{Deserialize, Serialize};

/// Placeholder for a missing author or category
pub const UNKNOWN: &str = "Unknown";

/// Read-only external book catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Runs one search; never retried
    async fn search(&self, query: &SearchQuery) -> CatalogResult<Vec<CatalogHit>>;

    /// Describes the source
    fn metadata(&self) -> SourceMetadata;
}

/// Search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: 20,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// True when there is nothing to search for
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One normalized catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHit {
    pub id: String,
    pub title: String,
    /// Authors joined with ", ", or [`UNKNOWN`]
    pub author: String,
    /// First category, or [`UNKNOWN`]
    pub genre: String,
    /// Cover thumbnail URL, possibly empty
    pub thumbnail: String,
}

impl CatalogHit {
    /// Draft for adding this hit to the collection
    pub fn to_draft(&self, status: BookStatus) -> BookDraft {
        BookDraft::new(&self.title, &self.author, &self.genre)
            .with_status(status)
            .with_image(&self.thumbnail)
    }
}

/// Source metadata
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_builder() {
        let query = SearchQuery::new("dune").with_limit(5);
        assert_eq!(query.text, "dune");
        assert_eq!(query.limit, 5);
        assert!(!query.is_blank());
        assert!(SearchQuery::new("   ").is_blank());
    }

    #[test]
    fn test_hit_to_draft() {
        let hit = CatalogHit {
            id: "vol-1".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Fiction".to_string(),
            thumbnail: "http://img/dune.jpg".to_string(),
        };

        let draft = hit.to_draft(BookStatus::InProgress);
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.author, "Frank Herbert");
        assert_eq!(draft.genre, "Fiction");
        assert_eq!(draft.status, BookStatus::InProgress);
        assert_eq!(draft.image, "http://img/dune.jpg");
        assert_eq!(draft.summary, "");
    }
}
