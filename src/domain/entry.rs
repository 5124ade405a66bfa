//! Registry Entry
//!
//! A labeled, coloured row or tier of the board.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: String,
    /// Display name
    pub name: String,
    /// Color (hex, e.g., "#FF7F7F")
    pub color: String,
}

impl RegistryEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

impl Entity for RegistryEntry {
    fn id(&self) -> &str {
        &self.id
    }
}
