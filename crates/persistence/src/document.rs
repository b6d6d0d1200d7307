// crates/persistence/src/document.rs
//! Authenticated document-store backend
//!
//! Books live in the `books` collection of a hosted document store. Writes
//! require a signed-in principal; the adapter stamps `userId` and ISO-8601
//! `createdAt`/`updatedAt` itself rather than trusting the backend clock.

use crate::adapter::PersistenceAdapter;
use crate::error::{AdapterError, AdapterResult};
use async_trait::async_trait;
use readlog_core::{Book, BookId, BookPatch, RawBook, Timestamp};
use readlog_session::{Principal, SessionGate};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Collection holding book documents
pub const BOOKS_COLLECTION: &str = "books";

/// Field map of a single document
pub type Document = Map<String, Value>;

/// Minimal hosted document-store contract
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection`, keyed by store id, in insertion order
    async fn list(&self, collection: &str) -> AdapterResult<Vec<(String, Document)>>;

    /// Adds a document and returns the store-assigned id
    async fn insert(&self, collection: &str, document: Document) -> AdapterResult<String>;

    /// Overwrites the given fields of an existing document
    async fn merge(&self, collection: &str, id: &str, fields: Document) -> AdapterResult<()>;

    /// Removes a document; missing ids are ignored
    async fn remove(&self, collection: &str, id: &str) -> AdapterResult<()>;
}

/// Document store kept in process memory
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<(String, Document)>>>,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail until turned back off
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Snapshot of one document, for inspection
    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections
            .get(collection)?
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, doc)| doc.clone())
    }

    /// Number of documents in `collection`
    pub fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.get(collection).map(Vec::len).unwrap_or(0)
    }

    fn ensure_online(&self) -> AdapterResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AdapterError::Unavailable("document store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> AdapterResult<Vec<(String, Document)>> {
        self.ensure_online()?;
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, document: Document) -> AdapterResult<String> {
        self.ensure_online()?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), document));
        Ok(id)
    }

    async fn merge(&self, collection: &str, id: &str, fields: Document) -> AdapterResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
            .map(|(_, doc)| doc)
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))?;
        document.extend(fields);
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> AdapterResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|(doc_id, _)| doc_id != id);
        }
        Ok(())
    }
}

/// Persistence backend over a [`DocumentStore`], gated on the session
#[derive(Clone)]
pub struct DocumentStoreAdapter {
    store: Arc<dyn DocumentStore>,
    session: SessionGate,
}

impl DocumentStoreAdapter {
    pub fn new(store: Arc<dyn DocumentStore>, session: SessionGate) -> Self {
        Self { store, session }
    }

    fn principal(&self) -> AdapterResult<Principal> {
        self.session.current().ok_or(AdapterError::Unauthenticated)
    }
}

fn to_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

#[async_trait]
impl PersistenceAdapter for DocumentStoreAdapter {
    fn name(&self) -> &str {
        "document-store"
    }

    async fn list(&self) -> AdapterResult<Vec<RawBook>> {
        let documents = self.store.list(BOOKS_COLLECTION).await?;
        documents
            .into_iter()
            .map(|(id, mut doc)| {
                doc.insert("id".to_string(), Value::String(id));
                Ok(serde_json::from_value(Value::Object(doc))?)
            })
            .collect()
    }

    async fn create(&self, record: &Book) -> AdapterResult<RawBook> {
        let principal = self.principal()?;
        let now = Timestamp::now().to_iso();

        let mut raw = RawBook::from(record);
        raw.id = None;
        raw.user_id = Some(principal.uid);
        raw.created_at = Some(now.clone());
        raw.updated_at = Some(now);

        let id = self
            .store
            .insert(BOOKS_COLLECTION, to_document(serde_json::to_value(&raw)?))
            .await?;
        raw.id = Some(id);
        Ok(raw)
    }

    async fn update(&self, id: &BookId, patch: &BookPatch) -> AdapterResult<()> {
        let principal = self.principal()?;
        let stamped = patch.stamped(Timestamp::now());

        let mut fields = to_document(serde_json::to_value(&stamped)?);
        fields.insert("userId".to_string(), Value::String(principal.uid));

        self.store.merge(BOOKS_COLLECTION, id.as_str(), fields).await
    }

    async fn delete(&self, id: &BookId) -> AdapterResult<()> {
        self.principal()?;
        self.store.remove(BOOKS_COLLECTION, id.as_str()).await
    }
}
