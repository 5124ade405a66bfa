//! Tier Board
//!
//! Layered architecture:
//! - domain: Core entities (items, locations, assignments, registry entries)
//! - engine: Pure reconciliation of assignment lists
//! - store: The session's canonical assignment list
//! - registry: Rows and tiers of the board
//! - catalog: Item sources and loading state
//! - repository: Key-value persistence
//! - commands: `TierBoard`, the host-facing session
//! - config: Storage keys, catalog settings, file locations

pub mod catalog;
pub mod commands;
pub mod config;
pub mod domain;
pub mod engine;
pub mod registry;
pub mod repository;
pub mod store;

pub use catalog::{Catalog, CatalogLoader, CatalogSource, RemoteCatalog, StaticCatalog};
pub use commands::TierBoard;
pub use config::BoardConfig;
pub use domain::{Assignment, DragRef, Item, Location, PlacedItem};
pub use engine::MoveOutcome;
pub use repository::{BoardRepository, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::AssignmentStore;
