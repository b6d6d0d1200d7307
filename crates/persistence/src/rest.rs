// crates/persistence/src/rest.rs
//! Open REST resource backend
//!
//! - `GET    {base}/books`       → array of records
//! - `POST   {base}/books`       → created record
//! - `PUT    {base}/books/{id}`  ← partial patch
//! - `DELETE {base}/books/{id}`

use crate::adapter::PersistenceAdapter;
use crate::error::AdapterResult;
use async_trait::async_trait;
use readlog_core::{Book, BookId, BookPatch, RawBook};
use readlog_network::Client;

/// Default local development server
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Backend for a plain JSON `/books` resource; accepts any caller
#[derive(Clone)]
pub struct RestAdapter {
    client: Client,
    collection_url: String,
}

impl RestAdapter {
    /// Creates an adapter rooted at `base_url` using a default client
    pub fn new(base_url: &str) -> AdapterResult<Self> {
        Ok(Self::with_client(Client::new()?, base_url))
    }

    /// Creates an adapter over an existing client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            collection_url: format!("{}/books", base_url.trim_end_matches('/')),
        }
    }

    /// URL of the books collection
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn record_url(&self, id: &BookId) -> String {
        format!("{}/{}", self.collection_url, urlencoding::encode(id.as_str()))
    }
}

#[async_trait]
impl PersistenceAdapter for RestAdapter {
    fn name(&self) -> &str {
        "rest"
    }

    async fn list(&self) -> AdapterResult<Vec<RawBook>> {
        let values: Vec<serde_json::Value> = self.client.get_json(&self.collection_url).await?;
        Ok(values.into_iter().filter_map(RawBook::from_value).collect())
    }

    async fn create(&self, record: &Book) -> AdapterResult<RawBook> {
        let mut stored: RawBook = self.client.post_json(&self.collection_url, record).await?;
        // servers that echo without an id accepted ours
        if stored.id.is_none() {
            stored.id = Some(record.id.to_string());
        }
        Ok(stored)
    }

    async fn update(&self, id: &BookId, patch: &BookPatch) -> AdapterResult<()> {
        self.client.put_json(&self.record_url(id), patch).await?;
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> AdapterResult<()> {
        match self.client.delete(&self.record_url(id)).await {
            Err(e) if e.is_not_found() => {
                log::debug!("Delete of {} hit 404, treating as done", id);
                Ok(())
            }
            other => Ok(other?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let adapter = RestAdapter::new("http://localhost:3001/").unwrap();
        assert_eq!(adapter.collection_url(), "http://localhost:3001/books");
        assert_eq!(
            adapter.record_url(&BookId::new("a b")),
            "http://localhost:3001/books/a%20b"
        );
    }

    #[test]
    fn test_name() {
        let adapter = RestAdapter::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(adapter.name(), "rest");
    }
}
