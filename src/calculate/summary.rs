//! Ranking summaries over finalized statistics.

use serde::Serialize;

use crate::models::{MatchupRating, TournamentStats};

/// One ranked archetype line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedArchetype {
    pub archetype: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
}

/// Top archetypes by win rate among those with enough decided matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub min_matches: u32,
    pub top: Vec<RankedArchetype>,
    pub total_archetypes: usize,
}

/// Rank archetypes with at least `min_matches` wins + losses, best first.
pub fn summarize(stats: &TournamentStats, min_matches: u32, top_n: usize) -> StatsSummary {
    let top = stats
        .sorted_by_win_rate()
        .into_iter()
        .filter(|a| a.decided() >= min_matches)
        .take(top_n)
        .map(|a| RankedArchetype {
            archetype: a.archetype.clone(),
            wins: a.wins,
            losses: a.losses,
            draws: a.draws,
            win_rate: a.win_rate,
        })
        .collect();

    StatsSummary {
        min_matches,
        top,
        total_archetypes: stats.archetypes.len(),
    }
}

/// One row of an archetype's matchup table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRow {
    pub opponent: String,
    pub record: String,
    pub percentage: f64,
    pub rating: MatchupRating,
}

/// Matchup rows for one archetype, most played first. `None` if unknown.
pub fn matchup_table(stats: &TournamentStats, archetype: &str) -> Option<Vec<MatchupRow>> {
    let entry = stats.get_archetype(archetype)?;

    let mut rows: Vec<_> = entry.matchups.iter().collect();
    rows.sort_by(|(a_name, a), (b_name, b)| {
        b.total()
            .cmp(&a.total())
            .then_with(|| b.percentage.total_cmp(&a.percentage))
            .then_with(|| a_name.cmp(b_name))
    });

    Some(
        rows.into_iter()
            .map(|(opponent, m)| MatchupRow {
                opponent: opponent.clone(),
                record: m.record_string(),
                percentage: m.percentage,
                rating: m.rating(),
            })
            .collect(),
    )
}
