// crates/persistence/src/lib.rs
//! Persistence backends for ReadLog
//!
//! Every backend implements [`PersistenceAdapter`]:
//! - [`RestAdapter`]: open JSON resource, client-chosen ids
//! - [`DocumentStoreAdapter`]: hosted document store, store-assigned ids,
//!   writes gated on a [`readlog_session::SessionGate`]
//! - [`MemoryAdapter`]: in-process, with failure injection for tests

mod adapter;
mod document;
mod error;
mod memory;
mod rest;

pub use adapter::PersistenceAdapter;
pub use document::{
    Document, DocumentStore, DocumentStoreAdapter, MemoryDocumentStore, BOOKS_COLLECTION,
};
pub use error::{AdapterError, AdapterResult};
pub use memory::{MemoryAdapter, Operation};
pub use rest::{RestAdapter, DEFAULT_BASE_URL};
