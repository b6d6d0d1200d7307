// crates/store/src/lib.rs
//! Client-side synchronized book collection
//!
//! [`CollectionStore`] holds the canonical list of books, checks every
//! mutation against the field and duplicate rules, applies it optimistically
//! and then persists it through a [`readlog_persistence::PersistenceAdapter`].
//! What happens to local state when persistence fails is decided by the
//! store's [`FailurePolicy`], which defaults per [`BackendVariant`].
//!
//! # Example
//!
//! ```rust
//! use readlog_core::{BookDraft, BookStatus};
//! use readlog_persistence::MemoryAdapter;
//! use readlog_store::CollectionStore;
//! use std::sync::Arc;
//!
//! # tokio_test_block_on(async {
//! let store = CollectionStore::open(Arc::new(MemoryAdapter::new()));
//! let book = store
//!     .add(BookDraft::new("Dune", "Frank Herbert", "Science Fiction"))
//!     .await
//!     .unwrap();
//!
//! store.set_status(&book.id, BookStatus::Done).await.unwrap();
//! assert_eq!(store.by_status(BookStatus::Done).len(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

mod collection;
mod error;
mod policy;
mod store;

pub use error::{ErrorKind, LocalEffect, StoreError, StoreResult};
pub use policy::{BackendVariant, CreateFailure, FailurePolicy, UpdateFailure};
pub use store::CollectionStore;
