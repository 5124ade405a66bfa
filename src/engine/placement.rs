//! Placement Operations
//!
//! Handles every drag gesture that ends on (or hovers over) a location.
//! Hover layers may call `move_assignment` many times per gesture with the
//! same arguments; after the first call further calls return the same list.

use crate::domain::{find_index, Assignment, DragRef, Location};

use super::positioning::{insert_at, reindex_location, renumber, take_group};
use super::removal::remove_assignment;
use super::{MoveOutcome, Transition};

/// Apply a drag of `dragged` onto `target` at `target_index`.
///
/// - dropped outside with an assignment id: delete that assignment
/// - pool tile without id: copy a new assignment into `target`
/// - anything with an id: relocate that assignment in place
///
/// A cell never receives a second assignment of the same item.
pub fn move_assignment(
    assignments: &[Assignment],
    dragged: &DragRef,
    target: &Location,
    target_index: Option<usize>,
    dropped_outside: bool,
) -> Transition {
    if dropped_outside {
        return match dragged.assignment_id.as_deref() {
            Some(assignment_id) => remove_assignment(assignments, &dragged.item_id, assignment_id),
            // Pool tiles dropped nowhere have nothing to delete
            None => Transition::unchanged(assignments, MoveOutcome::Unchanged),
        };
    }

    let Some(index) = resolve(assignments, dragged) else {
        log::debug!(
            "Engine: stale drag for item '{}' ({:?})",
            dragged.item_id,
            dragged.assignment_id
        );
        return Transition::unchanged(assignments, MoveOutcome::Stale);
    };
    let current = &assignments[index];

    if occupied_by_other(assignments, current, target) {
        log::debug!(
            "Engine: '{}' already placed at {}, move rejected",
            current.item_id,
            target
        );
        return Transition::unchanged(assignments, MoveOutcome::Rejected);
    }

    let copy_out = current.is_unassigned() && dragged.assignment_id.is_none();
    if copy_out {
        if target.is_unassigned() {
            // Pool order is catalog order; rearranging it means nothing
            return Transition::unchanged(assignments, MoveOutcome::Unchanged);
        }
        return place_copy(assignments, &current.item_id, target, target_index);
    }

    relocate(assignments, index, target, target_index)
}

/// Index of the dragged assignment: by id when given, else the item's pool record
fn resolve(assignments: &[Assignment], dragged: &DragRef) -> Option<usize> {
    match dragged.assignment_id.as_deref() {
        Some(assignment_id) => find_index(assignments, assignment_id)
            .filter(|&i| assignments[i].item_id == dragged.item_id),
        None => assignments
            .iter()
            .position(|a| a.item_id == dragged.item_id && a.is_unassigned()),
    }
}

/// Would the move put a second copy of the item into the `target` cell?
fn occupied_by_other(assignments: &[Assignment], current: &Assignment, target: &Location) -> bool {
    if target.is_unassigned() || current.location == *target {
        return false;
    }
    assignments.iter().any(|a| {
        a.assignment_id != current.assignment_id
            && a.item_id == current.item_id
            && a.location == *target
    })
}

/// Copy-out from the pool; the pool record stays where it is
fn place_copy(
    assignments: &[Assignment],
    item_id: &str,
    target: &Location,
    target_index: Option<usize>,
) -> Transition {
    let mut next = assignments.to_vec();
    let mut group = take_group(&mut next, target);

    let placed = Assignment::placed(item_id, target.clone(), 0);
    let assignment_id = placed.assignment_id.clone();
    insert_at(&mut group, target_index, placed);
    renumber(&mut group);
    next.extend(group);

    log::debug!("Engine: placed '{}' at {} as {}", item_id, target, assignment_id);
    Transition::new(next, MoveOutcome::Placed { assignment_id })
}

/// Relocation keeps the assignment id; both touched locations are reindexed
fn relocate(
    assignments: &[Assignment],
    index: usize,
    target: &Location,
    target_index: Option<usize>,
) -> Transition {
    let mut next = assignments.to_vec();
    let mut moving = next.remove(index);
    let from = std::mem::replace(&mut moving.location, target.clone());
    moving.originated_from_unassigned = target.is_unassigned();
    let assignment_id = moving.assignment_id.clone();

    let mut group = take_group(&mut next, target);
    insert_at(&mut group, target_index, moving);
    renumber(&mut group);
    next.extend(group);

    if from != *target {
        reindex_location(&mut next, &from);
    }

    log::debug!("Engine: relocated {} from {} to {}", assignment_id, from, target);
    Transition::new(next, MoveOutcome::Relocated { assignment_id })
}
