//! Property-Based Tests for the Assignment Store
//!
//! Random gesture sequences over a small board. After every step:
//! - every location holds positions 0..N-1
//! - no item sits twice in one cell
//! - every catalog item keeps at least one assignment
//!
//! Repeating a move with identical arguments changes nothing after the
//! first call.

use std::collections::HashSet;

use proptest::prelude::*;
use tier_board::domain::{DragRef, Item, Location};
use tier_board::engine::is_dense;
use tier_board::{AssignmentStore, Catalog};

const ITEMS: [&str; 3] = ["a", "b", "c"];
const ROWS: [&str; 2] = ["attacker", "all-rounder"];
const TIERS: [&str; 2] = ["S", "A"];

#[derive(Debug, Clone)]
enum Op {
    DragFromPool {
        item: usize,
        target: usize,
        index: Option<usize>,
    },
    DragExisting {
        pick: usize,
        target: usize,
        index: Option<usize>,
        outside: bool,
    },
    DragStale {
        item: usize,
        target: usize,
    },
    Remove {
        pick: usize,
    },
    CascadeRow {
        row: usize,
    },
    CascadeTier {
        tier: usize,
    },
    Reset,
}

fn catalog() -> Catalog {
    Catalog::new(
        ITEMS
            .iter()
            .map(|id| Item::new(*id, id.to_uppercase(), format!("{}.png", id)))
            .collect(),
    )
}

/// 0 is the pool, the rest are the cells in row-major order
fn location(target: usize) -> Location {
    match target {
        0 => Location::Unassigned,
        n => {
            let cell = (n - 1) % (ROWS.len() * TIERS.len());
            Location::cell(ROWS[cell / TIERS.len()], TIERS[cell % TIERS.len()])
        }
    }
}

fn arb_target() -> impl Strategy<Value = usize> {
    0..5usize
}

fn arb_index() -> impl Strategy<Value = Option<usize>> {
    proptest::option::of(0..4usize)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..ITEMS.len(), arb_target(), arb_index())
            .prop_map(|(item, target, index)| Op::DragFromPool { item, target, index }),
        4 => (any::<usize>(), arb_target(), arb_index(), proptest::bool::weighted(0.15))
            .prop_map(|(pick, target, index, outside)| Op::DragExisting { pick, target, index, outside }),
        1 => (0..ITEMS.len(), arb_target()).prop_map(|(item, target)| Op::DragStale { item, target }),
        2 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
        1 => (0..ROWS.len()).prop_map(|row| Op::CascadeRow { row }),
        1 => (0..TIERS.len()).prop_map(|tier| Op::CascadeTier { tier }),
        1 => Just(Op::Reset),
    ]
}

/// The drag a move op would issue against the current state
fn move_args(store: &AssignmentStore, op: &Op) -> Option<(DragRef, Location, Option<usize>, bool)> {
    match op {
        Op::DragFromPool { item, target, index } => Some((
            DragRef::from_pool(ITEMS[*item]),
            location(*target),
            *index,
            false,
        )),
        Op::DragExisting {
            pick,
            target,
            index,
            outside,
        } => {
            let list = store.assignments();
            let picked = &list[pick % list.len()];
            Some((
                DragRef::placed(picked.item_id.clone(), picked.assignment_id.clone()),
                location(*target),
                *index,
                *outside,
            ))
        }
        Op::DragStale { item, target } => Some((
            DragRef::placed(ITEMS[*item], "no-such-assignment"),
            location(*target),
            None,
            false,
        )),
        _ => None,
    }
}

fn apply(store: &mut AssignmentStore, op: &Op) {
    if let Some((dragged, target, index, outside)) = move_args(store, op) {
        store.apply_move(&dragged, &target, index, outside);
        return;
    }
    match op {
        Op::Remove { pick } => {
            let list = store.assignments();
            let picked = list[pick % list.len()].clone();
            store.remove(&picked.item_id, &picked.assignment_id);
        }
        Op::CascadeRow { row } => {
            store.cascade_row(ROWS[*row]);
        }
        Op::CascadeTier { tier } => {
            store.cascade_tier(TIERS[*tier]);
        }
        Op::Reset => store.reset_all(),
        _ => unreachable!("move ops handled above"),
    }
}

fn check_invariants(store: &AssignmentStore) -> Result<(), TestCaseError> {
    let list = store.assignments();
    prop_assert!(is_dense(list), "positions not dense: {:?}", list);

    let mut cells = HashSet::new();
    for a in list.iter().filter(|a| !a.is_unassigned()) {
        prop_assert!(
            cells.insert((a.item_id.as_str(), &a.location)),
            "'{}' twice at {}",
            a.item_id,
            a.location
        );
    }

    for item in ITEMS {
        prop_assert!(list.iter().any(|a| a.item_id == item), "'{}' lost", item);
    }

    let ids: HashSet<&str> = list.iter().map(|a| a.assignment_id.as_str()).collect();
    prop_assert_eq!(ids.len(), list.len());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_after_every_step(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut store = AssignmentStore::initialize(catalog(), None);
        check_invariants(&store)?;
        for op in &ops {
            apply(&mut store, op);
            check_invariants(&store)?;
        }
    }

    #[test]
    fn repeated_moves_are_idempotent(
        setup in prop::collection::vec(arb_op(), 0..20),
        op in arb_op(),
        repeats in 1..5usize,
    ) {
        let mut store = AssignmentStore::initialize(catalog(), None);
        for step in &setup {
            apply(&mut store, step);
        }

        if let Some((dragged, target, index, outside)) = move_args(&store, &op) {
            store.apply_move(&dragged, &target, index, outside);
            let after_first = store.assignments().to_vec();
            for _ in 0..repeats {
                store.apply_move(&dragged, &target, index, outside);
                prop_assert_eq!(store.assignments(), after_first.as_slice());
            }
        }
    }

    #[test]
    fn reads_are_consistent_with_the_list(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut store = AssignmentStore::initialize(catalog(), None);
        for op in &ops {
            apply(&mut store, op);
        }

        // Every item shows up in the pool or in some cell
        let mut visible = HashSet::new();
        for target in 0..5 {
            for placed in store.get_by_location(&location(target)) {
                visible.insert(placed.item.id);
            }
        }
        for item in ITEMS {
            prop_assert!(
                visible.contains(item) || store.is_placed_anywhere_else(item),
                "'{}' not visible anywhere",
                item
            );
        }

        // The pool never lists an item twice
        let pool = store.get_by_location(&Location::Unassigned);
        let unique: HashSet<&str> = pool.iter().map(|p| p.item.id.as_str()).collect();
        prop_assert_eq!(unique.len(), pool.len());
    }
}
