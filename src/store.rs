//! Assignment Store
//!
//! Owns the canonical assignment list and the catalog it is resolved
//! against. Every mutation goes through the reconciliation engine; the list
//! itself is only ever read from outside.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::domain::{Assignment, DragRef, Location, PlacedItem};
use crate::engine::{self, MoveOutcome, Transition};

#[derive(Debug, Clone)]
pub struct AssignmentStore {
    catalog: Catalog,
    assignments: Vec<Assignment>,
}

impl AssignmentStore {
    /// Adopt `restored` when it is non-empty, else start with every item in
    /// the pool. Either way the result covers the whole catalog.
    pub fn initialize(catalog: Catalog, restored: Option<Vec<Assignment>>) -> Self {
        let assignments = match restored {
            Some(list) if !list.is_empty() => {
                log::info!("Store: restoring {} assignments", list.len());
                engine::reconcile_restored(list, &catalog)
            }
            _ => engine::initial_assignments(&catalog),
        };
        Self { catalog, assignments }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Items shown at `location`, in display order.
    ///
    /// The pool is ordered by catalog order and shows each item once. Records
    /// whose item is missing from the catalog are skipped.
    pub fn get_by_location(&self, location: &Location) -> Vec<PlacedItem> {
        let mut group = engine::ordered_at(&self.assignments, location);
        if location.is_unassigned() {
            group.sort_by_key(|a| self.catalog.order_of(&a.item_id).unwrap_or(usize::MAX));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        group
            .into_iter()
            .filter(|a| !location.is_unassigned() || seen.insert(a.item_id.as_str()))
            .filter_map(|a| {
                self.catalog.get(&a.item_id).map(|item| PlacedItem {
                    item: item.clone(),
                    assignment_id: a.assignment_id.clone(),
                    originated_from_unassigned: a.originated_from_unassigned,
                })
            })
            .collect()
    }

    /// True when the item sits in at least one cell
    pub fn is_placed_anywhere_else(&self, item_id: &str) -> bool {
        self.assignments
            .iter()
            .any(|a| a.item_id == item_id && !a.is_unassigned())
    }

    /// Number of assignments at `location` (pool duplicates included)
    pub fn count_at(&self, location: &Location) -> usize {
        self.assignments.iter().filter(|a| &a.location == location).count()
    }

    pub fn apply_move(
        &mut self,
        dragged: &DragRef,
        target: &Location,
        target_index: Option<usize>,
        dropped_outside: bool,
    ) -> MoveOutcome {
        let transition = engine::move_assignment(
            &self.assignments,
            dragged,
            target,
            target_index,
            dropped_outside,
        );
        self.adopt(transition)
    }

    pub fn remove(&mut self, item_id: &str, assignment_id: &str) -> MoveOutcome {
        let transition = engine::remove_assignment(&self.assignments, item_id, assignment_id);
        self.adopt(transition)
    }

    /// Back to one pool record per catalog item
    pub fn reset_all(&mut self) {
        self.assignments = engine::initial_assignments(&self.catalog);
    }

    /// Delete every placement in `row_id`; returns how many were removed
    pub fn cascade_row(&mut self, row_id: &str) -> usize {
        let (kept, removed) = engine::remove_row(&self.assignments, row_id);
        self.adopt_cascade(kept, removed)
    }

    /// Delete every placement in `tier_id`
    pub fn cascade_tier(&mut self, tier_id: &str) -> usize {
        let (kept, removed) = engine::remove_tier(&self.assignments, tier_id);
        self.adopt_cascade(kept, removed)
    }

    fn adopt(&mut self, transition: Transition) -> MoveOutcome {
        let Transition { mut assignments, outcome } = transition;
        if outcome.is_applied() {
            if matches!(outcome, MoveOutcome::Removed { .. }) {
                self.cover_catalog(&mut assignments);
            }
            debug_assert!(engine::is_dense(&assignments));
            self.assignments = assignments;
        }
        outcome
    }

    /// A cascade may take an item's only record with it
    fn adopt_cascade(&mut self, mut kept: Vec<Assignment>, removed: usize) -> usize {
        if removed > 0 {
            self.cover_catalog(&mut kept);
            self.assignments = kept;
        }
        removed
    }

    /// Items left without any record go back to the pool in catalog order
    fn cover_catalog(&self, assignments: &mut Vec<Assignment>) {
        let restored = engine::ensure_coverage(assignments, &self.catalog);
        if restored > 0 {
            log::debug!("Store: returned {} item(s) to the pool", restored);
            engine::sort_pool_by_catalog(assignments, &self.catalog);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;

    fn store(ids: &[&str]) -> AssignmentStore {
        let catalog = Catalog::new(ids.iter().map(|id| Item::new(*id, id.to_uppercase(), "")).collect());
        AssignmentStore::initialize(catalog, None)
    }

    fn names(items: &[PlacedItem]) -> Vec<String> {
        items.iter().map(|p| p.item.id.clone()).collect()
    }

    #[test]
    fn test_initial_pool() {
        let store = store(&["a", "b"]);
        assert_eq!(names(&store.get_by_location(&Location::Unassigned)), vec!["a", "b"]);
        assert!(store.get_by_location(&Location::cell("x", "S")).is_empty());
    }

    #[test]
    fn test_pool_is_deduplicated() {
        let catalog = Catalog::new(vec![Item::new("a", "A", "")]);
        let restored = vec![Assignment::unassigned("a", 0), Assignment::unassigned("a", 1)];
        let store = AssignmentStore::initialize(catalog, Some(restored));

        assert_eq!(store.count_at(&Location::Unassigned), 2);
        assert_eq!(store.get_by_location(&Location::Unassigned).len(), 1);
    }

    #[test]
    fn test_stale_items_are_skipped_on_read() {
        let catalog = Catalog::new(vec![Item::new("a", "A", "")]);
        let cell = Location::cell("attacker", "S");
        let restored = vec![
            Assignment::unassigned("a", 0),
            Assignment::placed("gone", cell.clone(), 0),
        ];
        let store = AssignmentStore::initialize(catalog, Some(restored));

        assert_eq!(store.count_at(&cell), 1);
        assert!(store.get_by_location(&cell).is_empty());
    }

    #[test]
    fn test_empty_restore_starts_fresh() {
        let catalog = Catalog::new(vec![Item::new("a", "A", "")]);
        let store = AssignmentStore::initialize(catalog, Some(Vec::new()));
        assert_eq!(store.assignments().len(), 1);
    }

    #[test]
    fn test_placement_flag() {
        let mut store = store(&["a"]);
        assert!(!store.is_placed_anywhere_else("a"));

        let outcome = store.apply_move(&DragRef::from_pool("a"), &Location::cell("x", "S"), None, false);
        assert!(outcome.is_applied());
        assert!(store.is_placed_anywhere_else("a"));
    }

    #[test]
    fn test_rejected_move_leaves_state() {
        let mut store = store(&["a"]);
        let cell = Location::cell("x", "S");
        store.apply_move(&DragRef::from_pool("a"), &cell, None, false);
        let before = store.assignments().to_vec();

        let outcome = store.apply_move(&DragRef::from_pool("a"), &cell, None, false);
        assert_eq!(outcome, MoveOutcome::Rejected);
        assert_eq!(store.assignments(), before.as_slice());
    }

    #[test]
    fn test_cascade_restores_lost_items() {
        let mut store = store(&["a", "b"]);
        let cell = Location::cell("row-1", "S");
        let pool_id = store
            .assignments()
            .iter()
            .find(|a| a.item_id == "a")
            .unwrap()
            .assignment_id
            .clone();
        // Explicitly move the pool record itself into the cell
        store.apply_move(&DragRef::placed("a", pool_id), &cell, None, false);
        assert_eq!(names(&store.get_by_location(&Location::Unassigned)), vec!["b"]);

        assert_eq!(store.cascade_row("row-1"), 1);
        assert_eq!(names(&store.get_by_location(&Location::Unassigned)), vec!["a", "b"]);
        assert!(engine::is_dense(store.assignments()));
    }

    #[test]
    fn test_removing_cell_only_item_returns_it_to_the_pool() {
        let catalog = Catalog::new(vec![Item::new("a", "A", ""), Item::new("b", "B", "")]);
        let cell = Location::cell("attacker", "S");
        let only = Assignment::placed("a", cell.clone(), 0);
        let restored = vec![only.clone(), Assignment::unassigned("b", 0)];

        let mut store = AssignmentStore::initialize(catalog.clone(), Some(restored.clone()));
        let outcome = store.remove("a", &only.assignment_id);
        assert_eq!(outcome, MoveOutcome::Removed { assignment_id: only.assignment_id.clone() });
        assert!(store.get_by_location(&cell).is_empty());
        assert_eq!(names(&store.get_by_location(&Location::Unassigned)), vec!["a", "b"]);
        assert!(engine::is_dense(store.assignments()));

        let mut store = AssignmentStore::initialize(catalog, Some(restored));
        let dragged = DragRef::placed("a", only.assignment_id.clone());
        let outcome = store.apply_move(&dragged, &cell, None, true);
        assert_eq!(outcome, MoveOutcome::Removed { assignment_id: only.assignment_id });
        assert!(store.get_by_location(&cell).is_empty());
        assert_eq!(names(&store.get_by_location(&Location::Unassigned)), vec!["a", "b"]);
        assert!(engine::is_dense(store.assignments()));
    }
}
