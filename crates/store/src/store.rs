// crates/store/src/store.rs
//! The synchronized collection store

use crate::collection::Collection;
use crate::error::{LocalEffect, StoreError, StoreResult};
use crate::policy::{BackendVariant, CreateFailure, FailurePolicy, UpdateFailure};
use readlog_core::validation::{validate_draft, validate_patch};
use readlog_core::{
    normalize_all, normalize_at, Book, BookDraft, BookId, BookPatch, BookStatus, DuplicateKey,
    RawBook, Timestamp,
};
use readlog_persistence::PersistenceAdapter;
use readlog_session::{Principal, SessionGate};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct State {
    books: Collection,
    /// Keys of adds still waiting on the backend
    pending: HashSet<DuplicateKey>,
    loads_in_flight: usize,
    last_error: Option<String>,
}

impl State {
    fn key_taken(&self, key: &DuplicateKey, except: Option<&BookId>) -> bool {
        self.pending.contains(key) || self.books.has_duplicate(key, except)
    }
}

/// Owns the in-memory book collection and mediates every mutation
///
/// Share it behind an `Arc`; all methods take `&self`. The state lock is
/// released before each backend call, so operations interleave in whatever
/// order their completions arrive.
pub struct CollectionStore {
    adapter: Arc<dyn PersistenceAdapter>,
    session: Option<SessionGate>,
    variant: BackendVariant,
    policy: FailurePolicy,
    state: Mutex<State>,
}

impl CollectionStore {
    /// Store over an open backend; no session is consulted
    pub fn open(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self::build(adapter, None, BackendVariant::Open)
    }

    /// Store over a per-user backend; mutations require a principal on `session`
    pub fn authenticated(adapter: Arc<dyn PersistenceAdapter>, session: SessionGate) -> Self {
        Self::build(adapter, Some(session), BackendVariant::Authenticated)
    }

    fn build(
        adapter: Arc<dyn PersistenceAdapter>,
        session: Option<SessionGate>,
        variant: BackendVariant,
    ) -> Self {
        Self {
            adapter,
            session,
            variant,
            policy: FailurePolicy::for_variant(variant),
            state: Mutex::new(State::default()),
        }
    }

    /// Overrides the variant's default failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn variant(&self) -> BackendVariant {
        self.variant
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Replaces the collection with the backend's records
    ///
    /// Returns the number of records loaded. On failure the collection is
    /// left untouched.
    pub async fn load(&self) -> StoreResult<usize> {
        let fetched = {
            let _loading = LoadingGuard::enter(&self.state);
            self.adapter.list().await
        };

        match fetched {
            Ok(raws) => {
                let mut state = self.lock();
                let dropped = state.books.replace(normalize_all(raws));
                let count = state.books.books().len();
                state.last_error = None;
                log::info!(
                    "Loaded {} books from {} ({} dropped)",
                    count,
                    self.adapter.name(),
                    dropped
                );
                Ok(count)
            }
            Err(e) => {
                log::warn!("Load from {} failed: {}", self.adapter.name(), e);
                self.fail(StoreError::Load(e))
            }
        }
    }

    /// Validates, persists and inserts a new book
    pub async fn add(&self, draft: BookDraft) -> StoreResult<Book> {
        let principal = match self.authorize() {
            Ok(p) => p,
            Err(e) => return self.fail(e),
        };
        if let Err(e) = validate_draft(&draft) {
            return self.fail(e.into());
        }

        let now = Timestamp::now();
        let key = DuplicateKey::of_draft(&draft);
        let (record, _pending) = {
            let mut state = self.lock();
            if state.key_taken(&key, None) {
                drop(state);
                return self.fail(StoreError::Duplicate {
                    title: draft.title.trim().to_string(),
                });
            }
            state.pending.insert(key.clone());
            let mut record = Book::from_draft(state.books.next_local_id(), &draft, now);
            record.user_id = principal.map(|p| p.uid);
            (record, PendingAdd { state: &self.state, key })
        };
        log::debug!("Adding \"{}\" as {}", record.title, record.id);

        match self.adapter.create(&record).await {
            Ok(stored) => {
                // fields the backend left out keep their local values
                let book = normalize_at(stored.or(RawBook::from(&record)), now);
                self.lock().books.upsert(book.clone());
                Ok(book)
            }
            Err(source) => {
                let local = match self.policy.on_create {
                    CreateFailure::KeepLocal => {
                        self.lock().books.upsert(record);
                        LocalEffect::Retained
                    }
                    CreateFailure::Discard => LocalEffect::Discarded,
                };
                log::warn!("Create failed ({}): {}", local, source);
                self.fail(StoreError::Transport { source, local })
            }
        }
    }

    /// Merges `patch` into a record optimistically, then persists it
    ///
    /// Returns the record as merged locally.
    pub async fn edit(&self, id: &BookId, patch: BookPatch) -> StoreResult<Book> {
        if let Err(e) = self.authorize() {
            return self.fail(e);
        }
        if let Err(e) = validate_patch(&patch) {
            return self.fail(e.into());
        }

        let now = Timestamp::now();
        let patch = patch.trimmed().stamped(now);
        let merged = merge_local(&mut self.lock(), id, &patch, now);
        let (snapshot, updated) = match merged {
            Ok(pair) => pair,
            Err(e) => return self.fail(e),
        };
        log::debug!("Editing {}", id);

        match self.adapter.update(id, &patch).await {
            Ok(()) => Ok(updated),
            Err(source) => {
                let local = match self.policy.on_update {
                    UpdateFailure::KeepOptimistic => LocalEffect::Retained,
                    UpdateFailure::Rollback => {
                        let mut state = self.lock();
                        if let Some(book) = state.books.get_mut(id) {
                            book.revert(&patch, &snapshot);
                        }
                        LocalEffect::RolledBack
                    }
                };
                log::warn!("Update of {} failed ({}): {}", id, local, source);
                self.fail(StoreError::Transport { source, local })
            }
        }
    }

    /// Drops a record locally, then deletes it from the backend
    ///
    /// The local removal stands even if the backend call fails.
    pub async fn remove(&self, id: &BookId) -> StoreResult<()> {
        if let Err(e) = self.authorize() {
            return self.fail(e);
        }

        if self.lock().books.remove(id).is_none() {
            log::debug!("Remove of {}: not held locally", id);
        }

        match self.adapter.delete(id).await {
            Ok(()) => Ok(()),
            Err(source) => {
                log::warn!("Delete of {} failed: {}", id, source);
                self.fail(StoreError::Transport {
                    source,
                    local: LocalEffect::Retained,
                })
            }
        }
    }

    /// Moves a book to another reading state
    pub async fn set_status(&self, id: &BookId, status: BookStatus) -> StoreResult<Book> {
        self.edit(id, BookPatch::new().with_status(status)).await
    }

    /// Replaces a book's summary
    pub async fn set_summary(&self, id: &BookId, summary: impl Into<String>) -> StoreResult<Book> {
        self.edit(id, BookPatch::new().with_summary(summary)).await
    }

    /// Snapshot of every book, in collection order
    pub fn books(&self) -> Vec<Book> {
        self.lock().books.books().to_vec()
    }

    pub fn get(&self, id: &BookId) -> Option<Book> {
        self.lock().books.get(id).cloned()
    }

    /// Books in one reading state, in collection order
    pub fn by_status(&self, status: BookStatus) -> Vec<Book> {
        self.lock()
            .books
            .books()
            .iter()
            .filter(|b| b.status == status)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().books.books().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while a `load` is waiting on the backend
    pub fn is_loading(&self) -> bool {
        self.lock().loads_in_flight > 0
    }

    /// Message of the most recent failure, until cleared or a load succeeds
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }

    fn authorize(&self) -> StoreResult<Option<Principal>> {
        match &self.session {
            None => Ok(None),
            Some(gate) => gate.current().map(Some).ok_or(StoreError::Unauthenticated),
        }
    }

    fn fail<T>(&self, err: StoreError) -> StoreResult<T> {
        self.lock().last_error = Some(err.to_string());
        Err(err)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Applies `patch` to the local record, returning it before and after
fn merge_local(
    state: &mut State,
    id: &BookId,
    patch: &BookPatch,
    now: Timestamp,
) -> StoreResult<(Book, Book)> {
    let current = state
        .books
        .get(id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    let renames = patch.title.is_some() || patch.author.is_some() || patch.genre.is_some();
    if renames && state.key_taken(&DuplicateKey::of_patched(current, patch), Some(id)) {
        return Err(StoreError::Duplicate {
            title: patch.title.as_deref().unwrap_or(&current.title).trim().to_string(),
        });
    }

    let snapshot = current.clone();
    let book = state
        .books
        .get_mut(id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    book.apply(patch, now);
    Ok((snapshot, book.clone()))
}

/// Releases an add's duplicate key once its create call settles
struct PendingAdd<'a> {
    state: &'a Mutex<State>,
    key: DuplicateKey,
}

impl Drop for PendingAdd<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.pending.remove(&self.key);
    }
}

/// Counts a load as in flight until dropped, including on cancellation
struct LoadingGuard<'a>(&'a Mutex<State>);

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a Mutex<State>) -> Self {
        state.lock().unwrap_or_else(|e| e.into_inner()).loads_in_flight += 1;
        Self(state)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.0.lock().unwrap_or_else(|e| e.into_inner());
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readlog_persistence::{MemoryAdapter, Operation};

    fn draft(title: &str) -> BookDraft {
        BookDraft::new(title, "Frank Herbert", "Science Fiction")
    }

    fn open_store() -> (Arc<MemoryAdapter>, CollectionStore) {
        let adapter = Arc::new(MemoryAdapter::new());
        let store = CollectionStore::open(adapter.clone());
        (adapter, store)
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let (_, store) = open_store();
        let book = store.add(draft("Dune")).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&book.id).unwrap().title, "Dune");
        assert_eq!(book.created_at, book.updated_at);
        assert!(store.last_error().is_none());
    }

    #[tokio::test]
    async fn test_validation_runs_before_backend() {
        let (adapter, store) = open_store();
        let err = store.add(draft("   ")).await.unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(adapter.calls(Operation::Create), 0);
        assert!(store.last_error().is_some());
    }

    #[tokio::test]
    async fn test_edit_unknown_id_skips_backend() {
        let (adapter, store) = open_store();
        let err = store
            .set_status(&BookId::new("ghost"), BookStatus::Done)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(adapter.calls(Operation::Update), 0);
    }

    #[tokio::test]
    async fn test_status_only_edit_ignores_preexisting_duplicates() {
        let raw = |id: &str| RawBook {
            id: Some(id.to_string()),
            title: Some("Dune".to_string()),
            ..Default::default()
        };
        let adapter = Arc::new(MemoryAdapter::with_records(vec![raw("1"), raw("2")]));
        let store = CollectionStore::open(adapter);
        store.load().await.unwrap();

        let book = store.set_status(&BookId::new("1"), BookStatus::Done).await.unwrap();
        assert_eq!(book.status, BookStatus::Done);
    }

    #[tokio::test]
    async fn test_clear_error() {
        let (adapter, store) = open_store();
        adapter.fail_next(Operation::List);
        assert!(store.load().await.is_err());
        assert!(store.last_error().is_some());

        store.clear_error();
        assert!(store.last_error().is_none());
    }

    #[tokio::test]
    async fn test_with_policy_overrides_default() {
        let (_, store) = open_store();
        let store = store.with_policy(FailurePolicy::for_variant(BackendVariant::Open).with_rollback(true));
        assert_eq!(store.variant(), BackendVariant::Open);
        assert_eq!(store.policy().on_update, UpdateFailure::Rollback);
    }
}
