//! Player to archetype mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Competitor;
use crate::calculate::normalize_player_name;

/// Read-only lookup from player identity to the archetype they played.
///
/// Keyed by canonical player key (normalized display name). A stable player
/// ID, when both sides of the lookup have one, takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerArchetypeMap {
    /// Canonical player key -> archetype
    #[serde(default)]
    pub by_name: BTreeMap<String, String>,

    /// Provider player ID -> archetype
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_id: BTreeMap<u64, String>,
}

impl PlayerArchetypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player by display name. The name is normalized first.
    pub fn insert(&mut self, display_name: &str, archetype: impl Into<String>) {
        self.by_name
            .insert(normalize_player_name(display_name), archetype.into());
    }

    /// Register a player by stable ID.
    pub fn insert_id(&mut self, player_id: u64, archetype: impl Into<String>) {
        self.by_id.insert(player_id, archetype.into());
    }

    /// Archetype for an already canonical player key.
    pub fn get(&self, canonical_key: &str) -> Option<&str> {
        self.by_name.get(canonical_key).map(String::as_str)
    }

    /// Archetype for a competitor: player ID first, then normalized name.
    pub fn resolve(&self, competitor: &Competitor) -> Option<&str> {
        competitor
            .player_id
            .and_then(|id| self.by_id.get(&id))
            .map(String::as_str)
            .or_else(|| self.get(&normalize_player_name(&competitor.display_name)))
    }

    /// Number of players mapped by name.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_id.is_empty()
    }
}

impl FromIterator<(String, String)> for PlayerArchetypeMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = PlayerArchetypeMap::new();
        for (name, archetype) in iter {
            map.insert(&name, archetype);
        }
        map
    }
}
