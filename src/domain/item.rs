//! Item Entity
//!
//! A catalog entry that can be placed into board cells. Items are owned by the
//! catalog and never changed by the engine.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Image URL or asset path
    #[serde(alias = "imageUrl")]
    pub image_ref: String,
    /// Optional category carried from the catalog source
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_ref: image_ref.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

impl Entity for Item {
    fn id(&self) -> &str {
        &self.id
    }
}
