//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde, thiserror and uuid).

mod assignment;
mod entity;
mod entry;
mod item;
mod location;

pub use assignment::{new_assignment_id, Assignment, DragRef, PlacedItem};
pub use entity::{find_index, DomainError, DomainResult, Entity};
pub use entry::RegistryEntry;
pub use item::Item;
pub use location::{is_valid_row_id, is_valid_tier_id, Location, UNASSIGNED_KEY};
