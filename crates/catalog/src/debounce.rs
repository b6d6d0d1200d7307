// crates/catalog/src/debounce.rs
//! Debounced, generation-keyed search

use crate::error::CatalogResult;
use crate::traits::{CatalogHit, CatalogSource, SearchQuery};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default wait before a query is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Result of a debounced search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Hits for the latest query
    Results(Vec<CatalogHit>),
    /// A newer query started first; this one's answer is stale
    Superseded,
}

impl SearchOutcome {
    /// Hits, or `None` if superseded
    pub fn into_results(self) -> Option<Vec<CatalogHit>> {
        match self {
            SearchOutcome::Results(hits) => Some(hits),
            SearchOutcome::Superseded => None,
        }
    }
}

/// Wraps a source so that only the newest of overlapping queries wins
///
/// Every call bumps a generation counter, sleeps for the debounce interval
/// and gives up if another call arrived meanwhile. The same check runs again
/// after the fetch, so a slow response never overwrites a newer one.
pub struct DebouncedSearch {
    source: Arc<dyn CatalogSource>,
    delay: Duration,
    limit: usize,
    generation: AtomicU64,
}

impl DebouncedSearch {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            delay: DEFAULT_DEBOUNCE,
            limit: 20,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Generation of the most recent call
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidates any query still waiting or in flight
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn search(&self, text: &str) -> CatalogResult<SearchOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = SearchQuery::new(text).with_limit(self.limit);
        if query.is_blank() {
            return Ok(SearchOutcome::Results(Vec::new()));
        }

        tokio::time::sleep(self.delay).await;
        if self.generation() != generation {
            log::trace!("Query {:?} superseded before fetch", text);
            return Ok(SearchOutcome::Superseded);
        }

        let hits = self.source.search(&query).await;
        if self.generation() != generation {
            log::trace!("Query {:?} superseded during fetch", text);
            return Ok(SearchOutcome::Superseded);
        }

        hits.map(SearchOutcome::Results)
    }
}
