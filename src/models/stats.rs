//! Archetype and matchup statistics models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Match result from one side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideResult {
    Win,
    Loss,
    Draw,
}

impl SideResult {
    /// The same result seen from the other side of the table.
    pub fn opposite(self) -> Self {
        match self {
            SideResult::Win => SideResult::Loss,
            SideResult::Loss => SideResult::Win,
            SideResult::Draw => SideResult::Draw,
        }
    }
}

/// Matchup classification based on matchup percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupRating {
    StronglyFavorable,
    Favorable,
    Even,
    Unfavorable,
    StronglyUnfavorable,
    NoData,
}

impl MatchupRating {
    /// Classify a matchup percentage (0 to 100).
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 60.0 {
            MatchupRating::StronglyFavorable
        } else if percentage >= 55.0 {
            MatchupRating::Favorable
        } else if percentage >= 45.0 {
            MatchupRating::Even
        } else if percentage >= 40.0 {
            MatchupRating::Unfavorable
        } else {
            MatchupRating::StronglyUnfavorable
        }
    }
}

impl std::fmt::Display for MatchupRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchupRating::StronglyFavorable => write!(f, "++"),
            MatchupRating::Favorable => write!(f, "+"),
            MatchupRating::Even => write!(f, "="),
            MatchupRating::Unfavorable => write!(f, "-"),
            MatchupRating::StronglyUnfavorable => write!(f, "--"),
            MatchupRating::NoData => write!(f, "?"),
        }
    }
}

/// Head-to-head record of one archetype against one opponent archetype.
///
/// Counts are from the perspective of the archetype that owns the entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,

    /// wins / (wins + losses) * 100, draws excluded
    #[serde(default)]
    pub percentage: f64,
}

impl MatchupStats {
    /// Count one match result.
    pub fn record(&mut self, result: SideResult) {
        match result {
            SideResult::Win => self.wins += 1,
            SideResult::Loss => self.losses += 1,
            SideResult::Draw => self.draws += 1,
        }
    }

    /// Matches with a winner (the win rate denominator).
    pub fn decided(&self) -> u32 {
        self.wins + self.losses
    }

    /// All matches, draws included.
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Rating of this matchup. Undecided matchups have no data.
    pub fn rating(&self) -> MatchupRating {
        if self.decided() == 0 {
            MatchupRating::NoData
        } else {
            MatchupRating::from_percentage(self.percentage)
        }
    }

    /// "W-L" or "W-L-D" when draws exist.
    pub fn record_string(&self) -> String {
        if self.draws > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.draws)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }

    fn add_counts(&mut self, other: &MatchupStats) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
    }
}

/// Overall record of one archetype plus its per-opponent matchups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeStats {
    /// Archetype name
    pub archetype: String,

    pub wins: u32,
    pub losses: u32,
    pub draws: u32,

    /// wins / (wins + losses) * 100, draws excluded
    #[serde(default)]
    pub win_rate: f64,

    /// Opponent archetype -> record against it
    #[serde(default)]
    pub matchups: BTreeMap<String, MatchupStats>,
}

impl ArchetypeStats {
    /// Create an archetype entry with zeroed counters.
    pub fn new(archetype: impl Into<String>) -> Self {
        Self {
            archetype: archetype.into(),
            wins: 0,
            losses: 0,
            draws: 0,
            win_rate: 0.0,
            matchups: BTreeMap::new(),
        }
    }

    /// Matches with a winner (the win rate denominator).
    pub fn decided(&self) -> u32 {
        self.wins + self.losses
    }

    /// All matches, draws included.
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Add another entry's counters into this one. Rates are left untouched.
    pub fn add_counts(&mut self, other: &ArchetypeStats) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;

        for (opponent, matchup) in &other.matchups {
            self.matchups
                .entry(opponent.clone())
                .or_default()
                .add_counts(matchup);
        }
    }
}

/// Finalized archetype statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentStats {
    /// Archetype name -> stats
    pub archetypes: BTreeMap<String, ArchetypeStats>,
}

impl TournamentStats {
    /// Get archetype by name. Exact match first, then case-insensitive.
    pub fn get_archetype(&self, name: &str) -> Option<&ArchetypeStats> {
        self.archetypes.get(name).or_else(|| {
            self.archetypes
                .values()
                .find(|a| a.archetype.eq_ignore_ascii_case(name))
        })
    }

    /// Archetypes sorted by win rate (descending), then wins, then name.
    pub fn sorted_by_win_rate(&self) -> Vec<&ArchetypeStats> {
        let mut sorted: Vec<_> = self.archetypes.values().collect();
        sorted.sort_by(|a, b| {
            b.win_rate
                .total_cmp(&a.win_rate)
                .then_with(|| b.wins.cmp(&a.wins))
                .then_with(|| a.archetype.cmp(&b.archetype))
        });
        sorted
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

/// Raw, not yet finalized archetype counts.
///
/// Partial tallies (e.g. one per round) combine with [`TournamentTally::merge`];
/// rates only exist after [`TournamentTally::finalize`] consumes the tally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentTally {
    archetypes: BTreeMap<String, ArchetypeStats>,
}

impl TournamentTally {
    pub(crate) fn from_archetypes(archetypes: BTreeMap<String, ArchetypeStats>) -> Self {
        Self { archetypes }
    }

    /// Raw counts collected so far.
    pub fn archetypes(&self) -> &BTreeMap<String, ArchetypeStats> {
        &self.archetypes
    }

    /// Add another tally's counters. Commutative and associative.
    pub fn merge(&mut self, other: TournamentTally) {
        for (name, stats) in other.archetypes {
            match self.archetypes.get_mut(&name) {
                Some(existing) => existing.add_counts(&stats),
                None => {
                    self.archetypes.insert(name, stats);
                }
            }
        }
    }

    /// Compute win rates and matchup percentages over the complete tally.
    pub fn finalize(self) -> TournamentStats {
        crate::calculate::finalize(TournamentStats {
            archetypes: self.archetypes,
        })
    }
}
