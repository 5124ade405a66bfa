//! Row/Tier Registry
//!
//! The labeled, coloured axes of the board. Rows and tiers share one
//! implementation parametrized by a [`RegistryKind`]. Requests outside the
//! kind's limits are ignored and reported as `false`/`None`; removing an
//! entry does not touch assignments, the caller cascades.

mod kinds;

use std::collections::HashSet;

use crate::domain::{find_index, RegistryEntry};

pub use kinds::{
    RegistryKind, RegistrySlot, MAX_ROWS, MAX_TIERS, MIN_ROWS, MIN_TIERS, ROWS, ROW_COLOR_PALETTE, TIERS,
    TIER_COLOR_PALETTE,
};

#[derive(Debug, Clone)]
pub struct Registry {
    kind: &'static RegistryKind,
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn defaults(kind: &'static RegistryKind) -> Self {
        Self {
            kind,
            entries: default_entries(kind),
        }
    }

    /// Rebuild from saved JSON, falling back to defaults when it is missing,
    /// unreadable or holds fewer than `kind.min` usable entries
    pub fn restore(kind: &'static RegistryKind, saved: Option<&str>) -> Self {
        let Some(raw) = saved else {
            return Self::defaults(kind);
        };

        match parse_saved(kind, raw) {
            Some(mut entries) if entries.len() >= kind.min => {
                if entries.len() > kind.max {
                    log::warn!("Registry: truncating saved {} to {}", kind.label, kind.max);
                    entries.truncate(kind.max);
                }
                Self { kind, entries }
            }
            _ => {
                log::warn!("Registry: saved {} unusable, using defaults", kind.label);
                Self::defaults(kind)
            }
        }
    }

    pub fn kind(&self) -> &'static RegistryKind {
        self.kind
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        find_index(&self.entries, id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        find_index(&self.entries, id).map(|i| &self.entries[i])
    }

    /// Display name of `id`, empty when unknown
    pub fn label(&self, id: &str) -> &str {
        self.get(id).map(|entry| entry.name.as_str()).unwrap_or("")
    }

    pub fn can_add(&self) -> bool {
        self.entries.len() < self.kind.max
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > self.kind.min
    }

    /// Append an entry with the first free generated id
    pub fn add(&mut self) -> Option<&RegistryEntry> {
        if !self.can_add() {
            return None;
        }

        let id = {
            let existing: HashSet<&str> = self.ids().collect();
            (1..)
                .map(|n| format!("{}{}", self.kind.id_prefix, n))
                .find(|candidate| !existing.contains(candidate.as_str()))?
        };

        let len = self.entries.len();
        let entry = RegistryEntry::new(
            id,
            format!("{}{}", self.kind.name_prefix, len + 1),
            self.kind.color_for(len),
        );
        log::debug!("Registry: added {} entry '{}'", self.kind.label, entry.id);
        self.entries.push(entry);
        self.entries.last()
    }

    pub fn remove(&mut self, id: &str) -> Option<RegistryEntry> {
        if !self.can_remove() {
            return None;
        }
        let index = find_index(&self.entries, id)?;
        Some(self.entries.remove(index))
    }

    /// Rename; blank names are refused
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn recolor(&mut self, id: &str, color: &str) -> bool {
        if color.is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.color = color.to_string();
                true
            }
            None => false,
        }
    }

    /// Move the entry at `from` to `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    pub fn reset_to_defaults(&mut self) {
        self.entries = default_entries(self.kind);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }
}

fn default_entries(kind: &RegistryKind) -> Vec<RegistryEntry> {
    kind.defaults
        .iter()
        .enumerate()
        .map(|(i, (id, name))| RegistryEntry::new(*id, *name, kind.color_for(i)))
        .collect()
}

/// Keep entries with string `id`/`name` and a valid, unique id; entries
/// saved without a colour get the palette colour of their index
fn parse_saved(kind: &RegistryKind, raw: &str) -> Option<Vec<RegistryEntry>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let array = value.as_array()?;

    let mut seen = HashSet::new();
    let usable: Vec<(&str, &str, Option<&str>)> = array
        .iter()
        .filter_map(|v| {
            let id = v.get("id")?.as_str()?;
            let name = v.get("name")?.as_str()?;
            if !(kind.is_valid_id)(id) || !seen.insert(id) {
                return None;
            }
            let color = v.get("color").and_then(|c| c.as_str()).filter(|c| !c.is_empty());
            Some((id, name, color))
        })
        .collect();

    Some(
        usable
            .into_iter()
            .enumerate()
            .map(|(i, (id, name, color))| {
                RegistryEntry::new(id, name, color.unwrap_or_else(|| kind.color_for(i)))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rows = Registry::defaults(&ROWS);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.entries()[2].id, "all-rounder");
        assert_eq!(rows.entries()[0].color, ROW_COLOR_PALETTE[0]);

        let tiers = Registry::defaults(&TIERS);
        let ids: Vec<&str> = tiers.ids().collect();
        assert_eq!(ids, vec!["S", "A", "B", "C"]);
        assert_eq!(tiers.label("A"), "A");
    }

    #[test]
    fn test_add_generates_free_id() {
        let mut rows = Registry::defaults(&ROWS);
        let added = rows.add().unwrap().clone();
        assert_eq!(added.id, "row-1");
        assert_eq!(added.name, "Row 6");
        assert_eq!(added.color, ROW_COLOR_PALETTE[5]);

        rows.rename("row-1", "Custom");
        assert_eq!(rows.add().unwrap().id, "row-2");
    }

    #[test]
    fn test_add_skips_taken_ids() {
        let saved = r#"[
            {"id":"row-1","name":"One"},{"id":"row-2","name":"Two"},
            {"id":"a","name":"A"},{"id":"b","name":"B"},{"id":"c","name":"C"}
        ]"#;
        let mut rows = Registry::restore(&ROWS, Some(saved));
        assert_eq!(rows.add().unwrap().id, "row-3");
    }

    #[test]
    fn test_add_stops_at_max() {
        let mut rows = Registry::defaults(&ROWS);
        while rows.can_add() {
            rows.add();
        }
        assert_eq!(rows.len(), MAX_ROWS);
        assert!(rows.add().is_none());
        assert_eq!(rows.len(), MAX_ROWS);
    }

    #[test]
    fn test_remove_stops_at_min() {
        let mut rows = Registry::defaults(&ROWS);
        assert!(rows.remove("attacker").is_none());

        rows.add();
        let removed = rows.remove("attacker").unwrap();
        assert_eq!(removed.id, "attacker");
        assert!(!rows.contains("attacker"));
    }

    #[test]
    fn test_generated_tier_ids_are_keyable() {
        let mut tiers = Registry::defaults(&TIERS);
        let id = tiers.add().unwrap().id.clone();
        assert_eq!(id, "T1");
        assert!(crate::domain::is_valid_tier_id(&id));
    }

    #[test]
    fn test_rename_and_recolor() {
        let mut tiers = Registry::defaults(&TIERS);
        assert!(tiers.rename("S", "  Top  "));
        assert_eq!(tiers.label("S"), "Top");
        assert!(!tiers.rename("S", "   "));
        assert!(!tiers.rename("missing", "X"));
        assert!(tiers.recolor("S", "#000000"));
        assert_eq!(tiers.get("S").unwrap().color, "#000000");
    }

    #[test]
    fn test_reorder() {
        let mut tiers = Registry::defaults(&TIERS);
        assert!(tiers.reorder(0, 3));
        let ids: Vec<&str> = tiers.ids().collect();
        assert_eq!(ids, vec!["A", "B", "C", "S"]);
        assert!(!tiers.reorder(0, 9));
        assert!(!tiers.reorder(1, 1));
    }

    #[test]
    fn test_restore_migrates_missing_colors() {
        let saved = r##"[
            {"id":"a","name":"A","color":"#111111"},
            {"id":"b","name":"B"},
            {"id":"c","name":"C"},
            {"id":"d","name":"D"},
            {"id":"e","name":"E","color":""}
        ]"##;
        let rows = Registry::restore(&ROWS, Some(saved));
        assert_eq!(rows.entries()[0].color, "#111111");
        assert_eq!(rows.entries()[1].color, ROW_COLOR_PALETTE[1]);
        assert_eq!(rows.entries()[4].color, ROW_COLOR_PALETTE[4]);
    }

    #[test]
    fn test_restore_falls_back_to_defaults() {
        assert_eq!(Registry::restore(&ROWS, Some("not json")).entries(), Registry::defaults(&ROWS).entries());
        assert_eq!(Registry::restore(&ROWS, Some("{}")).len(), 5);

        let too_few = r#"[{"id":"a","name":"A"},{"id":"b","name":"B"}]"#;
        assert_eq!(Registry::restore(&ROWS, Some(too_few)).entries()[0].id, "attacker");
    }

    #[test]
    fn test_restore_filters_bad_entries_and_truncates() {
        let mut saved = String::from("[");
        for i in 0..12 {
            saved.push_str(&format!(r#"{{"id":"r{}","name":"R{}"}},"#, i, i));
        }
        saved.push_str(r#"{"id":5,"name":"bad"},{"name":"no id"},{"id":"r0","name":"dup"}]"#);

        let rows = Registry::restore(&ROWS, Some(&saved));
        assert_eq!(rows.len(), MAX_ROWS);
        assert_eq!(rows.entries()[0].name, "R0");
    }

    #[test]
    fn test_restore_drops_hyphenated_tier_ids() {
        let saved = r#"[{"id":"S-plus","name":"S+"},{"id":"A","name":"A"}]"#;
        let tiers = Registry::restore(&TIERS, Some(saved));
        let ids: Vec<&str> = tiers.ids().collect();
        assert_eq!(ids, vec!["A"]);
    }

    #[test]
    fn test_json_round_trip_through_restore() {
        let mut tiers = Registry::defaults(&TIERS);
        tiers.rename("B", "Mid");
        let json = tiers.to_json().unwrap();
        let back = Registry::restore(&TIERS, Some(&json));
        assert_eq!(back.entries(), tiers.entries());
    }
}
