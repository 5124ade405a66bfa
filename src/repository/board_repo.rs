//! Board Repository
//!
//! Typed access to the board's persisted state on top of a [`KeyValueStore`]:
//! the assignment list and the two registries. Reads never fail; missing or
//! unreadable values come back as `None` and the caller synthesizes defaults.

use std::sync::Arc;

use crate::config::StorageKeys;
use crate::domain::Assignment;
use crate::registry::{Registry, RegistryKind, RegistrySlot};

use super::traits::{KeyValueStore, StorageResult};

#[derive(Clone)]
pub struct BoardRepository {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl BoardRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Saved assignment list; `None` when absent or unreadable
    pub fn load_assignments(&self) -> Option<Vec<Assignment>> {
        let raw = self.read(&self.keys.assignments)?;
        match serde_json::from_str::<Vec<Assignment>>(&raw) {
            Ok(list) => Some(list),
            Err(e) => {
                log::warn!("BoardRepository: discarding unreadable assignments: {}", e);
                None
            }
        }
    }

    pub fn save_assignments(&self, assignments: &[Assignment]) -> StorageResult<()> {
        let json = serde_json::to_string(assignments)?;
        self.store.save(&self.keys.assignments, &json)
    }

    pub fn clear_assignments(&self) -> StorageResult<()> {
        self.store.remove(&self.keys.assignments)
    }

    /// Registry of `kind`, restored from its saved entries or defaulted
    pub fn load_registry(&self, kind: &'static RegistryKind) -> Registry {
        let raw = self.read(self.registry_key(kind));
        Registry::restore(kind, raw.as_deref())
    }

    pub fn save_registry(&self, registry: &Registry) -> StorageResult<()> {
        let json = registry.to_json()?;
        self.store.save(self.registry_key(registry.kind()), &json)
    }

    pub fn clear_registry(&self, kind: &'static RegistryKind) -> StorageResult<()> {
        self.store.remove(self.registry_key(kind))
    }

    fn registry_key(&self, kind: &RegistryKind) -> &str {
        match kind.slot {
            RegistrySlot::Rows => &self.keys.rows,
            RegistrySlot::Tiers => &self.keys.tiers,
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("BoardRepository: failed to read '{}': {}", key, e);
                None
            }
        }
    }
}
