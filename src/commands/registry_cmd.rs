//! Row and Tier Commands
//!
//! Registry edits on a `TierBoard`. Removing a row or tier deletes the
//! placements in it; every successful edit is written immediately.

use crate::domain::RegistryEntry;
use crate::registry::{Registry, RegistryKind, ROWS, TIERS};

use super::board_cmd::TierBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Rows,
    Tiers,
}

impl TierBoard {
    // ========================
    // Rows
    // ========================

    pub fn add_row(&mut self) -> Option<RegistryEntry> {
        self.add_entry(Axis::Rows)
    }

    /// Remove a row and every placement in it
    pub fn remove_row(&mut self, id: &str) -> bool {
        self.remove_entry(Axis::Rows, id)
    }

    pub fn rename_row(&mut self, id: &str, name: &str) -> bool {
        self.edit_entry(Axis::Rows, |rows| rows.rename(id, name))
    }

    pub fn recolor_row(&mut self, id: &str, color: &str) -> bool {
        self.edit_entry(Axis::Rows, |rows| rows.recolor(id, color))
    }

    pub fn reorder_rows(&mut self, from: usize, to: usize) -> bool {
        self.edit_entry(Axis::Rows, |rows| rows.reorder(from, to))
    }

    pub fn reset_rows(&mut self) {
        self.reset_entries(Axis::Rows)
    }

    pub fn row_label(&self, id: &str) -> &str {
        self.rows.label(id)
    }

    // ========================
    // Tiers
    // ========================

    pub fn add_tier(&mut self) -> Option<RegistryEntry> {
        self.add_entry(Axis::Tiers)
    }

    /// Remove a tier and every placement in it
    pub fn remove_tier(&mut self, id: &str) -> bool {
        self.remove_entry(Axis::Tiers, id)
    }

    pub fn rename_tier(&mut self, id: &str, name: &str) -> bool {
        self.edit_entry(Axis::Tiers, |tiers| tiers.rename(id, name))
    }

    pub fn recolor_tier(&mut self, id: &str, color: &str) -> bool {
        self.edit_entry(Axis::Tiers, |tiers| tiers.recolor(id, color))
    }

    pub fn reorder_tiers(&mut self, from: usize, to: usize) -> bool {
        self.edit_entry(Axis::Tiers, |tiers| tiers.reorder(from, to))
    }

    pub fn reset_tiers(&mut self) {
        self.reset_entries(Axis::Tiers)
    }

    pub fn tier_label(&self, id: &str) -> &str {
        self.tiers.label(id)
    }

    // ========================
    // Shared
    // ========================

    fn registry_mut(&mut self, axis: Axis) -> &mut Registry {
        match axis {
            Axis::Rows => &mut self.rows,
            Axis::Tiers => &mut self.tiers,
        }
    }

    fn add_entry(&mut self, axis: Axis) -> Option<RegistryEntry> {
        let added = self.registry_mut(axis).add().cloned();
        if added.is_some() {
            self.persist_registry(axis);
        }
        added
    }

    fn remove_entry(&mut self, axis: Axis, id: &str) -> bool {
        let Some(removed) = self.registry_mut(axis).remove(id) else {
            return false;
        };
        self.cascade(axis, &removed.id);
        self.persist_registry(axis);
        true
    }

    fn edit_entry<F>(&mut self, axis: Axis, edit: F) -> bool
    where
        F: FnOnce(&mut Registry) -> bool,
    {
        let changed = edit(self.registry_mut(axis));
        if changed {
            self.persist_registry(axis);
        }
        changed
    }

    /// Defaults come back and the saved entries are dropped; placements in
    /// entries that did not survive are removed
    fn reset_entries(&mut self, axis: Axis) {
        let registry = self.registry_mut(axis);
        let before: Vec<String> = registry.ids().map(str::to_string).collect();
        registry.reset_to_defaults();
        let gone: Vec<String> = before
            .into_iter()
            .filter(|id| !registry.contains(id))
            .collect();

        for id in &gone {
            self.cascade(axis, id);
        }

        if let Err(e) = self.repo.clear_registry(kind_of(axis)) {
            log::warn!("TierBoard: failed to clear saved {}: {}", kind_of(axis).label, e);
        }
        log::info!("TierBoard: {} reset to defaults", kind_of(axis).label);
    }

    fn cascade(&mut self, axis: Axis, id: &str) {
        let removed = match axis {
            Axis::Rows => self.store.cascade_row(id),
            Axis::Tiers => self.store.cascade_tier(id),
        };
        if removed > 0 {
            log::info!(
                "TierBoard: removed {} placements with {} '{}'",
                removed,
                kind_of(axis).label,
                id
            );
            self.persist_assignments();
        }
    }

    fn persist_registry(&self, axis: Axis) {
        let registry = match axis {
            Axis::Rows => &self.rows,
            Axis::Tiers => &self.tiers,
        };
        if let Err(e) = self.repo.save_registry(registry) {
            log::warn!("TierBoard: failed to save {}: {}", registry.kind().label, e);
        }
    }
}

fn kind_of(axis: Axis) -> &'static RegistryKind {
    match axis {
        Axis::Rows => &ROWS,
        Axis::Tiers => &TIERS,
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::commands::TierBoard;
    use crate::config::StorageKeys;
    use crate::domain::{DragRef, Item, Location};
    use crate::repository::{BoardRepository, MemoryKeyValueStore};
    use std::sync::Arc;

    fn board() -> (TierBoard, BoardRepository) {
        let catalog = Catalog::new(vec![
            Item::new("a", "A", "a.png"),
            Item::new("b", "B", "b.png"),
        ]);
        let repo = BoardRepository::new(Arc::new(MemoryKeyValueStore::new()), StorageKeys::default());
        (TierBoard::open(catalog, repo.clone()), repo)
    }

    #[test]
    fn test_add_row_persists() {
        let (mut board, repo) = board();
        let added = board.add_row().unwrap();
        assert_eq!(added.id, "row-1");
        assert_eq!(repo.load_registry(&crate::registry::ROWS).len(), 6);
        assert_eq!(board.locations().len(), 6 * 4);
    }

    #[test]
    fn test_remove_row_cascades_placements() {
        let (mut board, repo) = board();
        let row = board.add_row().unwrap().id;
        let cell = Location::cell(row.as_str(), "S");
        board.commit_move(&DragRef::from_pool("a"), &cell, None, false);
        assert!(board.is_placed_anywhere_else("a"));

        assert!(board.remove_row(&row));
        assert!(!board.is_placed_anywhere_else("a"));
        assert_eq!(board.get_by_location(&Location::Unassigned).len(), 2);
        assert!(repo
            .load_assignments()
            .unwrap()
            .iter()
            .all(|a| a.location.row() != Some(row.as_str())));
    }

    #[test]
    fn test_remove_row_refused_at_minimum() {
        let (mut board, _) = board();
        assert!(!board.remove_row("attacker"));
        assert_eq!(board.rows().len(), 5);
    }

    #[test]
    fn test_remove_tier_cascades_only_that_tier() {
        let (mut board, _) = board();
        let s = Location::cell("attacker", "S");
        let a = Location::cell("attacker", "A");
        board.commit_move(&DragRef::from_pool("a"), &s, None, false);
        board.commit_move(&DragRef::from_pool("a"), &a, None, false);

        assert!(board.remove_tier("S"));
        assert!(board.get_by_location(&s).is_empty());
        assert_eq!(board.get_by_location(&a).len(), 1);
        assert_eq!(board.tiers().len(), 3);
    }

    #[test]
    fn test_rename_recolor_reorder_tiers() {
        let (mut board, repo) = board();
        assert!(board.rename_tier("S", "Top"));
        assert_eq!(board.tier_label("S"), "Top");
        assert!(!board.rename_tier("S", "  "));
        assert!(board.recolor_tier("A", "#123456"));
        assert!(board.reorder_tiers(0, 1));

        let saved = repo.load_registry(&crate::registry::TIERS);
        let ids: Vec<&str> = saved.ids().collect();
        assert_eq!(ids, vec!["A", "S", "B", "C"]);
        assert_eq!(saved.get("A").unwrap().color, "#123456");
    }

    #[test]
    fn test_reset_rows_drops_custom_rows_and_their_placements() {
        let (mut board, repo) = board();
        let row = board.add_row().unwrap().id;
        board.rename_row("attacker", "Carry");
        let cell = Location::cell(row.as_str(), "B");
        board.commit_move(&DragRef::from_pool("b"), &cell, None, false);

        board.reset_rows();
        assert_eq!(board.rows().len(), 5);
        assert_eq!(board.row_label("attacker"), "Attacker");
        assert!(!board.is_placed_anywhere_else("b"));
        assert!(repo.store().load("dynamicRows").unwrap().is_none());
    }
}
