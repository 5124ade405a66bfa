//! Reconciliation Engine
//!
//! Pure functions computing the next assignment list from the current one:
//! - placement: move / copy-out / reorder driven by drag gestures
//! - removal: single deletes and row/tier cascades
//! - lifecycle: initial state, reset, reconciliation of restored state
//! - positioning: dense per-location ranks
//!
//! No function here fails. Rejected or stale requests return the input list
//! unchanged together with an outcome saying why.

mod lifecycle;
mod placement;
mod positioning;
mod removal;

use crate::domain::Assignment;

pub use lifecycle::{ensure_coverage, initial_assignments, reconcile_restored, sort_pool_by_catalog};
pub use placement::move_assignment;
pub use positioning::{is_dense, ordered_at, reindex_all, reindex_location};
pub use removal::{remove_assignment, remove_row, remove_tier};

/// What an engine operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A new assignment was copied out of the pool into a cell
    Placed { assignment_id: String },
    /// An existing assignment changed location or rank
    Relocated { assignment_id: String },
    /// An assignment was deleted
    Removed { assignment_id: String },
    /// Refused by policy (duplicate cell placement, target off the board)
    Rejected,
    /// The drag reference no longer resolves
    Stale,
    /// Nothing to do
    Unchanged,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Placed { .. } | MoveOutcome::Relocated { .. } | MoveOutcome::Removed { .. }
        )
    }
}

/// Result of an engine operation: the full next list plus its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub assignments: Vec<Assignment>,
    pub outcome: MoveOutcome,
}

impl Transition {
    pub(crate) fn new(assignments: Vec<Assignment>, outcome: MoveOutcome) -> Self {
        Self { assignments, outcome }
    }

    /// Input carried through untouched
    pub(crate) fn unchanged(assignments: &[Assignment], outcome: MoveOutcome) -> Self {
        Self {
            assignments: assignments.to_vec(),
            outcome,
        }
    }
}
