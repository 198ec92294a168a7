//! Match record model: one head-to-head contest between two competitors.

use serde::{Deserialize, Serialize};

/// One side of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    /// Display name as reported by the match data provider
    pub display_name: String,

    /// Stable provider-side player ID, when the source has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<u64>,
}

impl Competitor {
    /// Create a competitor known only by display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            player_id: None,
        }
    }

    /// Attach a stable player ID.
    pub fn with_player_id(mut self, id: u64) -> Self {
        self.player_id = Some(id);
        self
    }
}

/// A single match with its free-text result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Round number, if known
    #[serde(default)]
    pub round: Option<u32>,

    /// Competitors in slot order (side 1 first)
    pub competitors: Vec<Competitor>,

    /// Result text, e.g. "Alice won 2-1-0" or "1-1-0 Draw"
    pub result: String,
}

impl MatchRecord {
    /// Create a two-sided match record.
    pub fn new(side1: Competitor, side2: Competitor, result: impl Into<String>) -> Self {
        Self {
            round: None,
            competitors: vec![side1, side2],
            result: result.into(),
        }
    }

    /// Set the round number.
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    /// The two sides of the match, or `None` if fewer than two competitors exist.
    pub fn sides(&self) -> Option<(&Competitor, &Competitor)> {
        match self.competitors.as_slice() {
            [side1, side2, ..] => Some((side1, side2)),
            _ => None,
        }
    }
}
