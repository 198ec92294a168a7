//! Provider round payloads to match records.
//!
//! Match data providers (melee.gg style) report rounds as
//! `{ "<round>": [Match, ...] }`, where each match lists competitors, each
//! competitor a team of players, and decklists hang off either the
//! competitor or the player. This module flattens that into
//! [`MatchRecord`]s and derives the player -> archetype map from the same data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculate::normalize_player_name;
use crate::models::{Competitor, MatchRecord, PlayerArchetypeMap};

/// Decklist metadata attached to a competitor or player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderDecklist {
    #[serde(default)]
    pub decklist_id: Option<serde_json::Value>,

    #[serde(default)]
    pub decklist_name: String,
}

/// A player within a competitor's team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderPlayer {
    #[serde(rename = "ID", default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decklists: Vec<ProviderDecklist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderTeam {
    #[serde(default)]
    pub players: Vec<ProviderPlayer>,
}

/// One side of a provider match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderCompetitor {
    #[serde(default)]
    pub team: ProviderTeam,

    #[serde(default)]
    pub decklists: Vec<ProviderDecklist>,
}

impl ProviderCompetitor {
    /// First player of the team; single-player formats only have one.
    pub fn player(&self) -> Option<&ProviderPlayer> {
        self.team.players.first()
    }

    /// Deck name: competitor-level decklist first, then the player's own.
    pub fn deck_name(&self) -> Option<&str> {
        self.decklists
            .first()
            .or_else(|| self.player().and_then(|p| p.decklists.first()))
            .map(|d| d.decklist_name.trim())
            .filter(|name| !name.is_empty())
    }
}

/// A provider match row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderMatch {
    #[serde(default)]
    pub table_number: Option<u32>,

    #[serde(default)]
    pub result_string: String,

    #[serde(default)]
    pub competitors: Vec<ProviderCompetitor>,
}

/// Provider matches keyed by round number.
pub type RoundMatches = BTreeMap<u32, Vec<ProviderMatch>>;

fn selected<'a>(
    rounds: &'a RoundMatches,
    selection: Option<&'a [u32]>,
) -> impl Iterator<Item = (u32, &'a ProviderMatch)> + 'a {
    rounds
        .iter()
        .filter(move |(round, _)| selection.map_or(true, |s| s.contains(*round)))
        .flat_map(|(round, matches)| matches.iter().map(move |m| (*round, m)))
}

/// Flatten provider rounds into match records.
///
/// `selection` limits the rounds taken; `None` takes all of them. Competitors
/// without players become empty names so aggregation skips the match.
pub fn match_records(rounds: &RoundMatches, selection: Option<&[u32]>) -> Vec<MatchRecord> {
    let records: Vec<MatchRecord> = selected(rounds, selection)
        .map(|(round, m)| MatchRecord {
            round: Some(round),
            competitors: m
                .competitors
                .iter()
                .map(|c| match c.player() {
                    Some(player) => Competitor {
                        display_name: player.display_name.clone(),
                        player_id: player.id,
                    },
                    None => Competitor::new(""),
                })
                .collect(),
            result: m.result_string.clone(),
        })
        .collect();

    info!("Flattened {} matches from {} rounds", records.len(), rounds.len());
    records
}

/// Build the player -> archetype map from decklist names in the payload.
///
/// Later rounds overwrite earlier ones for the same player.
pub fn extract_player_archetypes(
    rounds: &RoundMatches,
    selection: Option<&[u32]>,
) -> PlayerArchetypeMap {
    let mut map = PlayerArchetypeMap::new();

    for (_, m) in selected(rounds, selection) {
        for competitor in &m.competitors {
            let (Some(player), Some(deck)) = (competitor.player(), competitor.deck_name()) else {
                continue;
            };
            if player.display_name.trim().is_empty() {
                continue;
            }

            map.insert(&player.display_name, deck);
            if let Some(id) = player.id {
                map.insert_id(id, deck);
            }
        }
    }

    debug!("Mapped {} players to archetypes", map.len());
    map
}

/// Canonical player key -> display name as the provider spells it.
pub fn extract_player_names(rounds: &RoundMatches) -> BTreeMap<String, String> {
    let mut names = BTreeMap::new();

    for (_, m) in selected(rounds, None) {
        for player in m.competitors.iter().filter_map(ProviderCompetitor::player) {
            let key = normalize_player_name(&player.display_name);
            if !key.is_empty() {
                names.insert(key, player.display_name.clone());
            }
        }
    }

    names
}
