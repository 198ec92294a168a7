//! Parsed match outcome.

use serde::{Deserialize, Serialize};

/// Structured form of a match result string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedOutcome {
    /// "<Name> won A-B-C": a named winner with its game score.
    WinByName {
        winner: String,
        winner_games: u32,
        loser_games: u32,
        draws: u32,
    },

    /// A bare "A-B-C" score with no winner, read as an overall draw.
    DrawByScore {
        side1_wins: u32,
        side2_wins: u32,
        draws: u32,
    },

    /// Nothing recognisable in the text.
    Unparseable,
}

impl ParsedOutcome {
    /// Winner's display name; `None` means an overall draw (or no data).
    pub fn winner_name(&self) -> Option<&str> {
        match self {
            ParsedOutcome::WinByName { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// First game count. For a named win this is the winner's games.
    pub fn side1_wins(&self) -> u32 {
        match self {
            ParsedOutcome::WinByName { winner_games, .. } => *winner_games,
            ParsedOutcome::DrawByScore { side1_wins, .. } => *side1_wins,
            ParsedOutcome::Unparseable => 0,
        }
    }

    /// Second game count. For a named win this is the loser's games.
    pub fn side2_wins(&self) -> u32 {
        match self {
            ParsedOutcome::WinByName { loser_games, .. } => *loser_games,
            ParsedOutcome::DrawByScore { side2_wins, .. } => *side2_wins,
            ParsedOutcome::Unparseable => 0,
        }
    }

    /// Drawn games.
    pub fn draws(&self) -> u32 {
        match self {
            ParsedOutcome::WinByName { draws, .. } | ParsedOutcome::DrawByScore { draws, .. } => {
                *draws
            }
            ParsedOutcome::Unparseable => 0,
        }
    }

    pub fn is_parsed(&self) -> bool {
        !matches!(self, ParsedOutcome::Unparseable)
    }
}

impl std::fmt::Display for ParsedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsedOutcome::WinByName {
                winner,
                winner_games,
                loser_games,
                draws,
            } => write!(f, "{} won {}-{}-{}", winner, winner_games, loser_games, draws),
            ParsedOutcome::DrawByScore {
                side1_wins,
                side2_wins,
                draws,
            } => write!(f, "draw {}-{}-{}", side1_wins, side2_wins, draws),
            ParsedOutcome::Unparseable => write!(f, "unparseable"),
        }
    }
}
