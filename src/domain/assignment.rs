//! Assignment Entity
//!
//! One placement of one item at one location. An item may have many
//! assignments (one per cell plus its pool record).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;
use super::item::Item;
use super::location::Location;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique identifier, stable until the assignment is deleted
    pub assignment_id: String,
    /// Catalog item this assignment places
    pub item_id: String,
    pub location: Location,
    /// Rank within `location`
    pub position: usize,
    /// True when this record is the item's presence in the unassigned pool
    pub originated_from_unassigned: bool,
}

impl Assignment {
    /// Pool record for `item_id`
    pub fn unassigned(item_id: impl Into<String>, position: usize) -> Self {
        Self {
            assignment_id: new_assignment_id(),
            item_id: item_id.into(),
            location: Location::Unassigned,
            position,
            originated_from_unassigned: true,
        }
    }

    /// Fresh placement copied out of the pool
    pub fn placed(item_id: impl Into<String>, location: Location, position: usize) -> Self {
        Self {
            assignment_id: new_assignment_id(),
            item_id: item_id.into(),
            originated_from_unassigned: location.is_unassigned(),
            location,
            position,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.location.is_unassigned()
    }
}

impl Entity for Assignment {
    fn id(&self) -> &str {
        &self.assignment_id
    }
}

/// Time-ordered UUID; never reused
pub fn new_assignment_id() -> String {
    Uuid::now_v7().to_string()
}

/// What a drag gesture carries about the dragged tile.
///
/// Tiles rendered from the pool carry no assignment id; tiles rendered from a
/// cell carry the id of the assignment they show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragRef {
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
}

impl DragRef {
    pub fn from_pool(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            assignment_id: None,
        }
    }

    pub fn placed(item_id: impl Into<String>, assignment_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            assignment_id: Some(assignment_id.into()),
        }
    }
}

/// An item resolved for display at a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    #[serde(flatten)]
    pub item: Item,
    pub assignment_id: String,
    pub originated_from_unassigned: bool,
}

impl PlacedItem {
    /// Drag reference for this tile
    pub fn drag_ref(&self) -> DragRef {
        if self.originated_from_unassigned {
            DragRef::from_pool(self.item.id.clone())
        } else {
            DragRef::placed(self.item.id.clone(), self.assignment_id.clone())
        }
    }
}
