//! Location Keys
//!
//! A location is either the unassigned pool or a board cell addressed by
//! `(row, tier)`. This module is the only place where the string form
//! `"{row}-{tier}"` is built or split; everything else works on [`Location`].
//!
//! Tier ids never contain `-` while row ids may (`all-rounder`, `row-3`), so a
//! key is split at its last `-`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// String key of the unassigned pool
pub const UNASSIGNED_KEY: &str = "unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Location {
    /// The pool holding every catalog item not (only) placed in cells
    Unassigned,
    /// A board cell
    Cell { row: String, tier: String },
}

impl Location {
    pub fn cell(row: impl Into<String>, tier: impl Into<String>) -> Self {
        Location::Cell {
            row: row.into(),
            tier: tier.into(),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Location::Unassigned)
    }

    pub fn row(&self) -> Option<&str> {
        match self {
            Location::Cell { row, .. } => Some(row),
            Location::Unassigned => None,
        }
    }

    pub fn tier(&self) -> Option<&str> {
        match self {
            Location::Cell { tier, .. } => Some(tier),
            Location::Unassigned => None,
        }
    }

    /// Serialized key, e.g. `unassigned` or `attacker-S`
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn parse(key: &str) -> DomainResult<Self> {
        if key == UNASSIGNED_KEY {
            return Ok(Location::Unassigned);
        }

        match key.rsplit_once('-') {
            Some((row, tier)) if is_valid_row_id(row) && is_valid_tier_id(tier) => {
                Ok(Location::cell(row, tier))
            }
            _ => Err(DomainError::InvalidInput(format!(
                "'{}' is not a location key",
                key
            ))),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unassigned => f.write_str(UNASSIGNED_KEY),
            Location::Cell { row, tier } => write!(f, "{}-{}", row, tier),
        }
    }
}

impl FromStr for Location {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::parse(s)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

impl TryFrom<String> for Location {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Location::parse(&value)
    }
}

/// Row ids may contain `-` but must not collide with the pool key
pub fn is_valid_row_id(id: &str) -> bool {
    !id.is_empty() && id != UNASSIGNED_KEY
}

/// Tier ids are the key suffix and must not contain `-`
pub fn is_valid_tier_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('-')
}
