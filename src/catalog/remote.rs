//! Remote Catalog
//!
//! Fetches the item list over HTTP. Validators from the last successful
//! response are sent while the cache is fresh; a `304` answer is served from
//! the cached copy. Transport failures are retried with linear backoff,
//! non-2xx answers are reported as they are. There is no fallback to the
//! packaged list.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{CatalogSettings, StorageKeys};
use crate::domain::Item;
use crate::repository::{KeyValueStore, StorageError};

use super::source::CatalogSource;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Catalog server answered {0}")]
    Status(u16),
    #[error("Invalid catalog data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Catalog cache error: {0}")]
    Storage(#[from] StorageError),
    #[error("All {0} fetch attempts failed")]
    Exhausted(u32),
}

/// Validators of the cached catalog copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Unix milliseconds of the fetch that produced the cache
    pub timestamp: i64,
}

impl CacheMetadata {
    pub fn is_valid(&self, now_ms: i64, duration_ms: i64) -> bool {
        now_ms - self.timestamp < duration_ms
    }

    fn conditional_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let pairs = [
            (IF_NONE_MATCH, self.etag.as_deref()),
            (IF_MODIFIED_SINCE, self.last_modified.as_deref()),
        ];
        for (name, value) in pairs {
            let Some(value) = value else { continue };
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(_) => log::warn!("RemoteCatalog: ignoring unusable cached {}", name),
            }
        }
        headers
    }
}

pub struct RemoteCatalog {
    client: reqwest::Client,
    settings: CatalogSettings,
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl RemoteCatalog {
    pub fn new(
        settings: CatalogSettings,
        store: Arc<dyn KeyValueStore>,
        keys: StorageKeys,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            client,
            settings,
            store,
            keys,
        })
    }

    pub fn url(&self) -> &str {
        &self.settings.url
    }

    pub fn cached_metadata(&self) -> Option<CacheMetadata> {
        self.read_json(&self.keys.catalog_metadata)
    }

    pub fn cached_items(&self) -> Option<Vec<Item>> {
        self.read_json(&self.keys.catalog_data)
    }

    /// Drop the cached copy and its validators
    pub fn clear_cache(&self) -> Result<(), CatalogError> {
        self.store.remove(&self.keys.catalog_data)?;
        self.store.remove(&self.keys.catalog_metadata)?;
        Ok(())
    }

    async fn send_with_retry(&self, headers: HeaderMap) -> Result<Response, CatalogError> {
        let attempts = self.settings.retry_attempts;
        for attempt in 1..=attempts {
            let request = self.client.get(&self.settings.url).headers(headers.clone());
            match request.send().await {
                Ok(response) => return Ok(response),
                Err(e) if attempt == attempts => return Err(CatalogError::Http(e)),
                Err(e) => {
                    log::warn!(
                        "RemoteCatalog: attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        e
                    );
                    tokio::time::sleep(self.settings.retry_delay(attempt)).await;
                }
            }
        }
        Err(CatalogError::Exhausted(attempts))
    }

    fn store_cache(&self, items: &[Item], metadata: &CacheMetadata) {
        let result = serde_json::to_string(items)
            .map_err(StorageError::from)
            .and_then(|data| self.store.save(&self.keys.catalog_data, &data))
            .and_then(|_| {
                let meta = serde_json::to_string(metadata)?;
                self.store.save(&self.keys.catalog_metadata, &meta)
            });
        if let Err(e) = result {
            log::warn!("RemoteCatalog: failed to cache catalog: {}", e);
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.load(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
}

fn header_string(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    async fn fetch(&self) -> Result<Vec<Item>, CatalogError> {
        let now = chrono::Utc::now().timestamp_millis();
        let headers = self
            .cached_metadata()
            .filter(|meta| meta.is_valid(now, self.settings.cache_duration_ms))
            .map(|meta| meta.conditional_headers())
            .unwrap_or_default();

        let response = self.send_with_retry(headers).await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            if let Some(items) = self.cached_items() {
                log::info!("RemoteCatalog: not modified, using {} cached items", items.len());
                return Ok(items);
            }
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let metadata = CacheMetadata {
            etag: header_string(&response, ETAG),
            last_modified: header_string(&response, LAST_MODIFIED),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        let body = response.text().await?;
        let items: Vec<Item> = serde_json::from_str(&body)?;

        log::info!("RemoteCatalog: fetched {} items", items.len());
        self.store_cache(&items, &metadata);
        Ok(items)
    }
}
