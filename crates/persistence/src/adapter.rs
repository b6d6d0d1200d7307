// crates/persistence/src/adapter.rs
//! Backend-neutral persistence contract

use crate::error::AdapterResult;
use async_trait::async_trait;
use readlog_core::{Book, BookId, BookPatch, RawBook};

/// Interface to the external book store
///
/// Two families of implementation sit behind it: open resources that accept
/// any caller and client-supplied ids, and authenticated stores that assign
/// ids and stamp ownership from the session.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Fetches every stored record
    async fn list(&self) -> AdapterResult<Vec<RawBook>>;

    /// Persists a locally constructed record and returns it as stored
    ///
    /// Backends that assign their own ids ignore `record.id`; the returned
    /// record carries the authoritative id.
    async fn create(&self, record: &Book) -> AdapterResult<RawBook>;

    /// Merges `patch` into the stored record; last writer wins
    async fn update(&self, id: &BookId, patch: &BookPatch) -> AdapterResult<()>;

    /// Deletes a record; deleting a missing id is not an error
    async fn delete(&self, id: &BookId) -> AdapterResult<()>;
}
