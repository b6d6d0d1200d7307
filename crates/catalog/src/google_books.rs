// crates/catalog/src/google_books.rs
//! Google Books volumes API

use crate::error::{CatalogError, CatalogResult};
use crate::traits::{CatalogHit, CatalogSource, SearchQuery, SourceMetadata, UNKNOWN};
use async_trait::async_trait;
use readlog_network::Client;
use serde::Deserialize;

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";

/// Upper bound the API accepts for `maxResults`
pub const MAX_RESULTS_LIMIT: usize = 40;

/// Catalog backed by `GET {base}/volumes?q=..&maxResults=..`
pub struct GoogleBooksSource {
    client: Client,
    base_url: String,
}

impl GoogleBooksSource {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Points the source at another API root (mirrors, test servers)
    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn volumes_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/volumes?q={}&maxResults={}",
            self.base_url,
            urlencoding::encode(query.text.trim()),
            query.limit.clamp(1, MAX_RESULTS_LIMIT)
        )
    }
}

#[async_trait]
impl CatalogSource for GoogleBooksSource {
    async fn search(&self, query: &SearchQuery) -> CatalogResult<Vec<CatalogHit>> {
        if query.is_blank() {
            return Err(CatalogError::InvalidQuery("Empty query".to_string()));
        }

        let url = self.volumes_url(query);
        log::debug!("Catalog search: {}", url);

        let response: VolumesResponse = self.client.get_json(&url).await?;
        Ok(response.items.into_iter().map(Volume::into_hit).collect())
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Google Books".to_string(),
            base_url: self.base_url.clone(),
        }
    }
}

// Google Books API response structures

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo", default)]
    info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: String,
    authors: Vec<String>,
    categories: Vec<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    #[serde(default)]
    thumbnail: String,
}

impl Volume {
    fn into_hit(self) -> CatalogHit {
        let VolumeInfo {
            title,
            authors,
            categories,
            image_links,
        } = self.info;

        CatalogHit {
            id: self.id,
            title,
            author: if authors.is_empty() {
                UNKNOWN.to_string()
            } else {
                authors.join(", ")
            },
            genre: categories
                .into_iter()
                .next()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            thumbnail: image_links.map(|l| l.thumbnail).unwrap_or_default(),
        }
    }
}
