//! Repository Layer
//!
//! Persistence for board state.
//! - traits: `KeyValueStore` and storage errors
//! - db: SQLite implementation with migrations
//! - memory: in-memory implementation
//! - board_repo: typed load/save of assignments and registries

mod board_repo;
mod db;
mod memory;
mod traits;

pub use board_repo::BoardRepository;
pub use db::SqliteKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::{KeyValueStore, StorageError, StorageResult};
