// crates/catalog/src/lib.rs
//! External book catalog search
//!
//! Read-only lookups against a third-party catalog, used to find books
//! before adding them to the collection. [`DebouncedSearch`] keeps only the
//! newest of overlapping queries.

mod debounce;
mod error;
mod google_books;
mod traits;

pub use debounce::{DebouncedSearch, SearchOutcome, DEFAULT_DEBOUNCE};
pub use error::{CatalogError, CatalogResult};
pub use google_books::{GoogleBooksSource, DEFAULT_BASE_URL, MAX_RESULTS_LIMIT};
pub use traits::{CatalogHit, CatalogSource, SearchQuery, SourceMetadata, UNKNOWN};
