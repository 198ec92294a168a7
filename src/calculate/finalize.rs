//! Derived rate fields.

use crate::models::TournamentStats;

use super::calculate_win_rate;

/// Fill in `win_rate` for every archetype and `percentage` for every matchup.
///
/// Rates are recomputed from counts, so finalizing twice changes nothing.
pub fn finalize(mut stats: TournamentStats) -> TournamentStats {
    for archetype in stats.archetypes.values_mut() {
        archetype.win_rate = calculate_win_rate(archetype.wins, archetype.losses);

        for matchup in archetype.matchups.values_mut() {
            matchup.percentage = calculate_win_rate(matchup.wins, matchup.losses);
        }
    }
    stats
}
