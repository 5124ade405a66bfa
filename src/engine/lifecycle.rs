//! Assignment Lifecycle
//!
//! Initial state, reset, and reconciliation of a restored list against the
//! current catalog.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::domain::{Assignment, Location};

use super::positioning::reindex_all;

/// One pool record per catalog item, ranked in catalog order
pub fn initial_assignments(catalog: &Catalog) -> Vec<Assignment> {
    catalog
        .items()
        .iter()
        .enumerate()
        .map(|(position, item)| Assignment::unassigned(item.id.clone(), position))
        .collect()
}

/// Make a restored list consistent with `catalog`.
///
/// Records repeating an id or a `(item, cell)` pair are dropped (first wins),
/// catalog items referenced nowhere get a fresh pool record, the pool is put
/// in catalog order and every location is reindexed. Records of items the
/// catalog no longer has are kept; reads skip them.
pub fn reconcile_restored(restored: Vec<Assignment>, catalog: &Catalog) -> Vec<Assignment> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_cells: HashSet<(String, Location)> = HashSet::new();
    let mut kept = Vec::with_capacity(restored.len());
    let mut dropped = 0usize;

    for mut assignment in restored {
        if !seen_ids.insert(assignment.assignment_id.clone()) {
            dropped += 1;
            continue;
        }
        if !assignment.is_unassigned()
            && !seen_cells.insert((assignment.item_id.clone(), assignment.location.clone()))
        {
            dropped += 1;
            continue;
        }
        assignment.originated_from_unassigned = assignment.is_unassigned();
        kept.push(assignment);
    }

    if dropped > 0 {
        log::warn!("Engine: dropped {} conflicting restored assignments", dropped);
    }

    let added = ensure_coverage(&mut kept, catalog);
    if added > 0 {
        log::info!("Engine: added {} catalog items missing from restored state", added);
    }

    sort_pool_by_catalog(&mut kept, catalog);
    reindex_all(&mut kept);
    kept
}

/// Give every catalog item not referenced anywhere a pool record.
/// Returns the number of records added.
pub fn ensure_coverage(assignments: &mut Vec<Assignment>, catalog: &Catalog) -> usize {
    let referenced: HashSet<&str> = assignments.iter().map(|a| a.item_id.as_str()).collect();
    let missing: Vec<String> = catalog
        .items()
        .iter()
        .filter(|item| !referenced.contains(item.id.as_str()))
        .map(|item| item.id.clone())
        .collect();

    let mut next_position = assignments.iter().filter(|a| a.is_unassigned()).count();
    for item_id in &missing {
        assignments.push(Assignment::unassigned(item_id.clone(), next_position));
        next_position += 1;
    }
    missing.len()
}

/// Rank pool records by catalog order; unknown items go last in their
/// current order
pub fn sort_pool_by_catalog(assignments: &mut [Assignment], catalog: &Catalog) {
    let mut indices: Vec<usize> = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_unassigned())
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| {
        let a = &assignments[i];
        (catalog.order_of(&a.item_id).unwrap_or(usize::MAX), a.position, i)
    });

    for (new_pos, i) in indices.into_iter().enumerate() {
        assignments[i].position = new_pos;
    }
}
