//! Position Management
//!
//! Keeps the positions of every location dense and sequential (0, 1, 2, ...).

use std::collections::HashSet;

use crate::domain::{Assignment, Location};

/// Assignments at `location` in rank order; ties keep list order
pub fn ordered_at<'a>(assignments: &'a [Assignment], location: &Location) -> Vec<&'a Assignment> {
    let mut group: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| &a.location == location)
        .collect();
    group.sort_by_key(|a| a.position);
    group
}

/// Reindex the assignments at `location` to be sequential, keeping their order
pub fn reindex_location(assignments: &mut [Assignment], location: &Location) {
    let mut indices: Vec<usize> = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| &a.location == location)
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| assignments[i].position);

    for (new_pos, i) in indices.into_iter().enumerate() {
        assignments[i].position = new_pos;
    }
}

/// Reindex every location present in `assignments`
pub fn reindex_all(assignments: &mut [Assignment]) {
    let locations: HashSet<Location> = assignments.iter().map(|a| a.location.clone()).collect();
    for location in &locations {
        reindex_location(assignments, location);
    }
}

/// True when every location holds exactly the positions 0..N-1
pub fn is_dense(assignments: &[Assignment]) -> bool {
    let locations: HashSet<&Location> = assignments.iter().map(|a| &a.location).collect();
    locations.into_iter().all(|location| {
        let mut positions: Vec<usize> = assignments
            .iter()
            .filter(|a| &a.location == location)
            .map(|a| a.position)
            .collect();
        positions.sort_unstable();
        positions.iter().enumerate().all(|(i, &p)| i == p)
    })
}

/// Move the assignments at `location` out of `assignments`, in rank order
pub(crate) fn take_group(assignments: &mut Vec<Assignment>, location: &Location) -> Vec<Assignment> {
    let (mut group, rest): (Vec<Assignment>, Vec<Assignment>) = std::mem::take(assignments)
        .into_iter()
        .partition(|a| &a.location == location);
    *assignments = rest;
    group.sort_by_key(|a| a.position);
    group
}

/// Insert at `index`; a missing or out-of-range index appends
pub(crate) fn insert_at(group: &mut Vec<Assignment>, index: Option<usize>, assignment: Assignment) {
    match index {
        Some(i) if i < group.len() => group.insert(i, assignment),
        _ => group.push(assignment),
    }
}

/// Renumber a group already in display order
pub(crate) fn renumber(group: &mut [Assignment]) {
    for (new_pos, assignment) in group.iter_mut().enumerate() {
        assignment.position = new_pos;
    }
}
