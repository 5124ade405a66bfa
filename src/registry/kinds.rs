//! Registry Kinds
//!
//! Limits, defaults and id/name generation for the two board axes.

use std::fmt;

use crate::domain::{is_valid_row_id, is_valid_tier_id};

pub const MIN_ROWS: usize = 5;
pub const MAX_ROWS: usize = 9;
pub const MIN_TIERS: usize = 1;
pub const MAX_TIERS: usize = 8;

pub const ROW_COLOR_PALETTE: [&str; 9] = [
    "#E57373", "#FFB74D", "#FFF176", "#81C784", "#4FC3F7", "#7986CB", "#BA68C8", "#F06292", "#A1887F",
];

pub const TIER_COLOR_PALETTE: [&str; 8] = [
    "#FF7F7F", "#FFBF7F", "#FFDF7F", "#7FFF7F", "#7FBFFF", "#BF7FFF", "#FF7FDF", "#BFBFBF",
];

/// Which persisted registry a kind reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrySlot {
    Rows,
    Tiers,
}

pub struct RegistryKind {
    /// Used in log lines
    pub label: &'static str,
    pub slot: RegistrySlot,
    pub min: usize,
    pub max: usize,
    /// `(id, name)` pairs; colours come from the palette by index
    pub defaults: &'static [(&'static str, &'static str)],
    pub palette: &'static [&'static str],
    /// Prefix of generated ids, followed by the first free number
    pub id_prefix: &'static str,
    /// Prefix of generated names, followed by the new length
    pub name_prefix: &'static str,
    pub is_valid_id: fn(&str) -> bool,
}

impl fmt::Debug for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryKind")
            .field("label", &self.label)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

impl RegistryKind {
    /// Palette colour for the entry at `index`
    pub fn color_for(&self, index: usize) -> &'static str {
        self.palette[index % self.palette.len()]
    }
}

pub static ROWS: RegistryKind = RegistryKind {
    label: "rows",
    slot: RegistrySlot::Rows,
    min: MIN_ROWS,
    max: MAX_ROWS,
    defaults: &[
        ("attacker", "Attacker"),
        ("speedster", "Speedster"),
        ("all-rounder", "All-Rounder"),
        ("defender", "Defender"),
        ("supporter", "Supporter"),
    ],
    palette: &ROW_COLOR_PALETTE,
    id_prefix: "row-",
    name_prefix: "Row ",
    is_valid_id: is_valid_row_id,
};

pub static TIERS: RegistryKind = RegistryKind {
    label: "tiers",
    slot: RegistrySlot::Tiers,
    min: MIN_TIERS,
    max: MAX_TIERS,
    defaults: &[("S", "S"), ("A", "A"), ("B", "B"), ("C", "C")],
    palette: &TIER_COLOR_PALETTE,
    // Tier ids end location keys and must stay hyphen-free
    id_prefix: "T",
    name_prefix: "Tier ",
    is_valid_id: is_valid_tier_id,
};
