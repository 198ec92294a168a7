//! Match aggregation engine.
//!
//! Turns a batch of match records plus a player -> archetype map into
//! per-archetype and per-matchup statistics:
//! - Result string parsing
//! - Player name normalization
//! - Aggregation of match-level wins, losses and draws
//! - Win rate / matchup percentage finalization
//! - Ranking summaries

mod aggregate;
mod finalize;
mod names;
mod result;
mod summary;

pub use aggregate::*;
pub use finalize::*;
pub use names::*;
pub use result::*;
pub use summary::*;

/// Win rate as a percentage (0 to 100). Draws are not part of the denominator.
pub fn calculate_win_rate(wins: u32, losses: u32) -> f64 {
    let decided = wins + losses;
    if decided == 0 {
        0.0
    } else {
        wins as f64 / decided as f64 * 100.0
    }
}
