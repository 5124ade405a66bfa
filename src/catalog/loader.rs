//! Catalog Loader
//!
//! Runs a [`CatalogSource`] and keeps the readiness state the host shows
//! while the board cannot start yet.

use std::sync::Arc;

use serde::Serialize;

use super::{Catalog, CatalogSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingState {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            is_loading: true,
            error: None,
        }
    }
}

impl LoadingState {
    pub fn is_ready(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }
}

pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    state: LoadingState,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: LoadingState::default(),
        }
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    /// Fetch the catalog. On failure the error is kept in the state and
    /// `None` is returned; an empty list counts as a failure.
    pub async fn load(&mut self) -> Option<Catalog> {
        self.state = LoadingState::default();

        let result = self.source.fetch().await;
        self.state.is_loading = false;

        match result {
            Ok(items) if items.is_empty() => {
                log::error!("CatalogLoader: source returned no items");
                self.state.error = Some("Catalog is empty".to_string());
                None
            }
            Ok(items) => {
                log::info!("CatalogLoader: loaded {} items", items.len());
                Some(Catalog::new(items))
            }
            Err(e) => {
                log::error!("CatalogLoader: {}", e);
                self.state.error = Some(e.to_string());
                None
            }
        }
    }

    pub async fn retry(&mut self) -> Option<Catalog> {
        log::info!("CatalogLoader: retrying");
        self.load().await
    }
}
