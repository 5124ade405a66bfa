//! Removal Operations
//!
//! Deleting single placements and cascading row/tier deletions.

use crate::domain::{find_index, Assignment, Location};

use super::positioning::reindex_location;
use super::{MoveOutcome, Transition};

/// Delete one assignment and reindex the location it left.
///
/// `item_id` must match the assignment's item. Deleting an item's only record
/// leaves it unreferenced; the store gives it a fresh pool record afterwards.
pub fn remove_assignment(assignments: &[Assignment], item_id: &str, assignment_id: &str) -> Transition {
    let Some(index) = find_index(assignments, assignment_id) else {
        log::debug!("Engine: remove of unknown assignment {}", assignment_id);
        return Transition::unchanged(assignments, MoveOutcome::Stale);
    };

    if assignments[index].item_id != item_id {
        log::warn!(
            "Engine: assignment {} belongs to '{}', not '{}'",
            assignment_id,
            assignments[index].item_id,
            item_id
        );
        return Transition::unchanged(assignments, MoveOutcome::Stale);
    }

    let mut next = assignments.to_vec();
    let removed = next.remove(index);
    reindex_location(&mut next, &removed.location);

    Transition::new(
        next,
        MoveOutcome::Removed {
            assignment_id: removed.assignment_id,
        },
    )
}

/// Drop every assignment in a cell of `row_id`; returns the kept list and
/// the number removed
pub fn remove_row(assignments: &[Assignment], row_id: &str) -> (Vec<Assignment>, usize) {
    remove_where(assignments, |location| location.row() == Some(row_id))
}

/// Drop every assignment in a cell of `tier_id`
pub fn remove_tier(assignments: &[Assignment], tier_id: &str) -> (Vec<Assignment>, usize) {
    remove_where(assignments, |location| location.tier() == Some(tier_id))
}

/// Whole locations are removed, so the survivors stay dense
fn remove_where<F>(assignments: &[Assignment], matches: F) -> (Vec<Assignment>, usize)
where
    F: Fn(&Location) -> bool,
{
    let kept: Vec<Assignment> = assignments
        .iter()
        .filter(|a| !matches(&a.location))
        .cloned()
        .collect();
    let removed = assignments.len() - kept.len();
    (kept, removed)
}
