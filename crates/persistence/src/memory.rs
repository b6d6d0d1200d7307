// crates/persistence/src/memory.rs
//! In-memory backend with failure injection

use crate::adapter::PersistenceAdapter;
use crate::error::{AdapterError, AdapterResult};
use async_trait::async_trait;
use readlog_core::{Book, BookId, BookPatch, RawBook, Timestamp};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Adapter call kinds, for failure injection and call counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
struct State {
    records: Vec<RawBook>,
    fail_next: HashSet<Operation>,
    failing: HashSet<Operation>,
    calls: HashMap<Operation, usize>,
}

/// Backend holding records in a `Vec`
///
/// Accepts the caller's id unless `assign_ids` is set, in which case it
/// behaves like a store that picks its own ids.
#[derive(Default)]
pub struct MemoryAdapter {
    state: Mutex<State>,
    latency: Option<Duration>,
    assign_ids: bool,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `records` already stored
    pub fn with_records(records: Vec<RawBook>) -> Self {
        let adapter = Self::default();
        adapter.lock().records = records;
        adapter
    }

    /// Delays every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Ignores incoming ids and assigns fresh ones on create
    pub fn assigning_ids(mut self) -> Self {
        self.assign_ids = true;
        self
    }

    /// Fails the next call of kind `op` only
    pub fn fail_next(&self, op: Operation) {
        self.lock().fail_next.insert(op);
    }

    /// Fails every call of kind `op` until switched off
    pub fn set_failing(&self, op: Operation, failing: bool) {
        let mut state = self.lock();
        if failing {
            state.failing.insert(op);
        } else {
            state.failing.remove(&op);
        }
    }

    /// Number of calls of kind `op` received so far
    pub fn calls(&self, op: Operation) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Snapshot of stored records
    pub fn records(&self) -> Vec<RawBook> {
        self.lock().records.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn enter(&self, op: Operation) -> AdapterResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.lock();
        *state.calls.entry(op).or_insert(0) += 1;
        if state.fail_next.remove(&op) || state.failing.contains(&op) {
            log::debug!("Injected failure for {:?}", op);
            return Err(AdapterError::Unavailable(format!("injected {:?} failure", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryAdapter {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self) -> AdapterResult<Vec<RawBook>> {
        self.enter(Operation::List).await?;
        Ok(self.records())
    }

    async fn create(&self, record: &Book) -> AdapterResult<RawBook> {
        self.enter(Operation::Create).await?;

        let mut stored = RawBook::from(record);
        if self.assign_ids {
            stored.id = Some(uuid::Uuid::new_v4().to_string());
        }
        self.lock().records.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &BookId, patch: &BookPatch) -> AdapterResult<()> {
        self.enter(Operation::Update).await?;

        let mut state = self.lock();
        let raw = state
            .records
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(id.as_str()))
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))?;

        if let Some(title) = &patch.title {
            raw.title = Some(title.clone());
        }
        if let Some(author) = &patch.author {
            raw.author = Some(author.clone());
        }
        if let Some(genre) = &patch.genre {
            raw.genre = Some(genre.clone());
        }
        if let Some(status) = patch.status {
            raw.status = Some(status.as_str().to_string());
        }
        if let Some(summary) = &patch.summary {
            raw.summary = Some(summary.clone());
        }
        if let Some(image) = &patch.image {
            raw.image = Some(image.clone());
        }
        raw.updated_at = Some(patch.updated_at.unwrap_or_else(Timestamp::now).to_iso());
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> AdapterResult<()> {
        self.enter(Operation::Delete).await?;
        self.lock()
            .records
            .retain(|r| r.id.as_deref() != Some(id.as_str()));
        Ok(())
    }
}
