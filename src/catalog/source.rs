//! Catalog Sources
//!
//! Where the item list comes from. The board only needs the list once at
//! start-up; fetching is async because the remote source is.

use async_trait::async_trait;

use crate::domain::Item;

use super::CatalogError;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full item list in display order
    async fn fetch(&self) -> Result<Vec<Item>, CatalogError>;
}

/// Fixed, packaged item list
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    items: Vec<Item>,
}

impl StaticCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(builtin_items())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.clone())
    }
}

const ROSTER_BASE: &str = "https://unite.pokemon.com/images/pokemon";

/// Items shipped with the board
pub fn builtin_items() -> Vec<Item> {
    [
        ("pikachu", "Pikachu", "attacker"),
        ("charizard", "Charizard", "all-rounder"),
        ("lucario", "Lucario", "all-rounder"),
        ("snorlax", "Snorlax", "defender"),
        ("greninja", "Greninja", "attacker"),
        ("eldegoss", "Eldegoss", "supporter"),
        ("talonflame", "Talonflame", "speedster"),
        ("slowbro", "Slowbro", "defender"),
        ("absol", "Absol", "speedster"),
        ("machamp", "Machamp", "all-rounder"),
        ("mr-mime", "Mr. Mime", "supporter"),
        ("venusaur", "Venusaur", "attacker"),
    ]
    .into_iter()
    .map(|(id, name, kind)| {
        Item::new(id, name, format!("{}/{}/roster/roster-{}.png", ROSTER_BASE, id, id)).with_kind(kind)
    })
    .collect()
}
