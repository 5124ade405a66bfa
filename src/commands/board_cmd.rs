//! Board Session Commands
//!
//! `TierBoard` ties the assignment store, both registries and persistence
//! together into the surface a host drives from user gestures. Hover events
//! go to `preview_move`, the drop to `commit_move`; only commits write.

use crate::catalog::Catalog;
use crate::domain::{DragRef, Location, PlacedItem};
use crate::engine::MoveOutcome;
use crate::registry::{Registry, ROWS, TIERS};
use crate::repository::BoardRepository;
use crate::store::AssignmentStore;

pub struct TierBoard {
    pub(super) store: AssignmentStore,
    pub(super) rows: Registry,
    pub(super) tiers: Registry,
    pub(super) repo: BoardRepository,
    /// A preview changed state that has not been written yet
    dirty: bool,
}

impl TierBoard {
    /// Restore saved state for `catalog`, or start fresh
    pub fn open(catalog: Catalog, repo: BoardRepository) -> Self {
        let restored = repo.load_assignments();
        let store = AssignmentStore::initialize(catalog, restored);
        let rows = repo.load_registry(&ROWS);
        let tiers = repo.load_registry(&TIERS);

        log::info!(
            "TierBoard: opened with {} items, {} rows, {} tiers",
            store.catalog().len(),
            rows.len(),
            tiers.len()
        );

        Self {
            store,
            rows,
            tiers,
            repo,
            dirty: false,
        }
    }

    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    pub fn rows(&self) -> &Registry {
        &self.rows
    }

    pub fn tiers(&self) -> &Registry {
        &self.tiers
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    /// Every cell in display order, row by row
    pub fn locations(&self) -> Vec<Location> {
        self.rows
            .ids()
            .flat_map(|row| self.tiers.ids().map(move |tier| Location::cell(row, tier)))
            .collect()
    }

    pub fn get_by_location(&self, location: &Location) -> Vec<PlacedItem> {
        self.store.get_by_location(location)
    }

    pub fn is_placed_anywhere_else(&self, item_id: &str) -> bool {
        self.store.is_placed_anywhere_else(item_id)
    }

    /// Apply a move for a hover event without writing it
    pub fn preview_move(
        &mut self,
        dragged: &DragRef,
        target: &Location,
        target_index: Option<usize>,
        dropped_outside: bool,
    ) -> MoveOutcome {
        let outcome = self.apply_move(dragged, target, target_index, dropped_outside);
        if outcome.is_applied() {
            self.dirty = true;
        }
        outcome
    }

    /// Apply a move for the drop event and persist the result, including
    /// anything earlier previews changed
    pub fn commit_move(
        &mut self,
        dragged: &DragRef,
        target: &Location,
        target_index: Option<usize>,
        dropped_outside: bool,
    ) -> MoveOutcome {
        let outcome = self.apply_move(dragged, target, target_index, dropped_outside);
        if outcome.is_applied() || self.dirty {
            self.persist_assignments();
        }
        outcome
    }

    pub fn remove(&mut self, item_id: &str, assignment_id: &str) -> MoveOutcome {
        let outcome = self.store.remove(item_id, assignment_id);
        log::debug!("TierBoard: remove {} -> {:?}", assignment_id, outcome);
        if outcome.is_applied() {
            self.persist_assignments();
        }
        outcome
    }

    /// Everything back to the pool; the saved list is dropped
    pub fn reset_all(&mut self) {
        self.store.reset_all();
        self.dirty = false;
        if let Err(e) = self.repo.clear_assignments() {
            log::warn!("TierBoard: failed to clear saved assignments: {}", e);
        }
        log::info!("TierBoard: reset all assignments");
    }

    fn apply_move(
        &mut self,
        dragged: &DragRef,
        target: &Location,
        target_index: Option<usize>,
        dropped_outside: bool,
    ) -> MoveOutcome {
        if !dropped_outside && !self.is_on_board(target) {
            log::debug!("TierBoard: target {} is not on the board", target);
            return MoveOutcome::Rejected;
        }
        let outcome = self
            .store
            .apply_move(dragged, target, target_index, dropped_outside);
        log::debug!("TierBoard: move {} to {} -> {:?}", dragged.item_id, target, outcome);
        outcome
    }

    /// The pool, or a cell whose row and tier both exist
    fn is_on_board(&self, location: &Location) -> bool {
        match location {
            Location::Unassigned => true,
            Location::Cell { row, tier } => self.rows.contains(row) && self.tiers.contains(tier),
        }
    }

    pub(super) fn persist_assignments(&mut self) {
        match self.repo.save_assignments(self.store.assignments()) {
            Ok(()) => self.dirty = false,
            Err(e) => log::warn!("TierBoard: failed to save assignments: {}", e),
        }
    }
}
