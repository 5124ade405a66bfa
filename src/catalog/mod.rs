//! Catalog
//!
//! The read-only list of placeable items and the sources it is loaded from:
//! - source: `CatalogSource` trait and the packaged static list
//! - remote: HTTP source with conditional requests, retry and local cache
//! - loader: readiness/error state gating board start-up

mod loader;
mod remote;
mod source;

use std::collections::HashMap;

use crate::domain::Item;

pub use loader::{CatalogLoader, LoadingState};
pub use remote::{CacheMetadata, CatalogError, RemoteCatalog};
pub use source::{builtin_items, CatalogSource, StaticCatalog};

/// Ordered, id-indexed item list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog; a repeated id keeps its first entry
    pub fn new(items: Vec<Item>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        let mut unique = Vec::with_capacity(items.len());

        for item in items {
            if index.contains_key(&item.id) {
                log::warn!("Catalog: duplicate item id '{}' ignored", item.id);
                continue;
            }
            index.insert(item.id.clone(), unique.len());
            unique.push(item);
        }

        Self { items: unique, index }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    /// Display rank of `id` in catalog order
    pub fn order_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Item>> for Catalog {
    fn from(items: Vec<Item>) -> Self {
        Catalog::new(items)
    }
}
