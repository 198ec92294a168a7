//! Aggregation of match records into archetype statistics.
//!
//! Every match contributes at most one win/loss/draw per side, both to the
//! archetype's overall record and to its matchup entry against the opposing
//! archetype. Per-game scores inside the result string are not summed.
//!
//! No match can fail the batch: records that cannot be attributed are
//! skipped and counted in the [`AggregationReport`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{
    ArchetypeId, ArchetypeRegistry, ArchetypeStats, MatchRecord, MatchupStats, ParsedOutcome,
    PlayerArchetypeMap, SideResult, TournamentStats, TournamentTally,
};

use super::{normalize_player_name, parse_result};

/// Why a match was left out of the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer than two competitors
    MissingCompetitor,
    /// A side has no display name
    EmptyName,
    /// A side has no known archetype
    UnknownArchetype,
    /// No winner or score could be read from the result string
    UnparseableResult,
}

/// What happened to one match record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDisposition {
    /// Counted, with the result from side 1's perspective
    Counted { side1: SideResult },
    /// Both archetypes known but the named winner matched neither side;
    /// archetype entries exist but no counter moved
    UnresolvedWinner,
    Skipped(SkipReason),
}

/// Data-quality counters for one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub matches_seen: u32,
    pub matches_counted: u32,
    pub unresolved_winners: u32,
    pub unparseable_results: u32,
    pub skipped_missing_competitor: u32,
    pub skipped_empty_name: u32,
    pub skipped_unknown_archetype: u32,
    /// (first seen label, conflicting label) pairs differing only by case/whitespace
    #[serde(default)]
    pub suspect_archetype_labels: Vec<(String, String)>,
}

impl AggregationReport {
    pub fn skipped(&self) -> u32 {
        self.skipped_missing_competitor
            + self.skipped_empty_name
            + self.skipped_unknown_archetype
            + self.unparseable_results
    }

    fn count_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MissingCompetitor => self.skipped_missing_competitor += 1,
            SkipReason::EmptyName => self.skipped_empty_name += 1,
            SkipReason::UnknownArchetype => self.skipped_unknown_archetype += 1,
            SkipReason::UnparseableResult => self.unparseable_results += 1,
        }
    }
}

#[derive(Debug, Default)]
struct ArchetypeTally {
    overall: MatchupStats,
    matchups: BTreeMap<ArchetypeId, MatchupStats>,
}

/// Incremental aggregation over a batch of matches.
///
/// Owns the statistics being built until [`Aggregator::finish`] or
/// [`Aggregator::into_tally`] hands them off.
pub struct Aggregator<'a> {
    archetype_map: &'a PlayerArchetypeMap,
    registry: ArchetypeRegistry,
    tallies: Vec<ArchetypeTally>,
    report: AggregationReport,
}

impl<'a> Aggregator<'a> {
    pub fn new(archetype_map: &'a PlayerArchetypeMap) -> Self {
        Self {
            archetype_map,
            registry: ArchetypeRegistry::new(),
            tallies: Vec::new(),
            report: AggregationReport::default(),
        }
    }

    /// Fold one match into the running statistics.
    pub fn add_match(&mut self, record: &MatchRecord) -> MatchDisposition {
        self.report.matches_seen += 1;

        let disposition = self.count_match(record);
        match disposition {
            MatchDisposition::Counted { .. } => self.report.matches_counted += 1,
            MatchDisposition::UnresolvedWinner => self.report.unresolved_winners += 1,
            MatchDisposition::Skipped(reason) => {
                debug!(
                    "Skipping match (round {:?}, result {:?}): {:?}",
                    record.round, record.result, reason
                );
                self.report.count_skip(reason);
            }
        }
        disposition
    }

    /// Fold every match of a batch.
    pub fn add_matches<'m, I>(&mut self, matches: I)
    where
        I: IntoIterator<Item = &'m MatchRecord>,
    {
        for record in matches {
            self.add_match(record);
        }
    }

    fn count_match(&mut self, record: &MatchRecord) -> MatchDisposition {
        let Some((side1, side2)) = record.sides() else {
            return MatchDisposition::Skipped(SkipReason::MissingCompetitor);
        };

        let key1 = normalize_player_name(&side1.display_name);
        let key2 = normalize_player_name(&side2.display_name);
        if key1.is_empty() || key2.is_empty() {
            return MatchDisposition::Skipped(SkipReason::EmptyName);
        }

        let map = self.archetype_map;
        let (Some(archetype1), Some(archetype2)) = (map.resolve(side1), map.resolve(side2)) else {
            return MatchDisposition::Skipped(SkipReason::UnknownArchetype);
        };

        let winner = match parse_result(&record.result) {
            ParsedOutcome::WinByName { winner, .. } => Some(winner),
            ParsedOutcome::DrawByScore { .. } => None,
            ParsedOutcome::Unparseable => {
                return MatchDisposition::Skipped(SkipReason::UnparseableResult)
            }
        };

        let id1 = self.ensure_archetype(archetype1);
        let id2 = self.ensure_archetype(archetype2);

        let side1_result = match winner {
            Some(winner) => {
                let winner_key = normalize_player_name(&winner);
                if winner_key == key1 {
                    SideResult::Win
                } else if winner_key == key2 {
                    SideResult::Loss
                } else {
                    warn!(
                        "Winner {:?} matches neither {:?} nor {:?}; not attributing result",
                        winner, side1.display_name, side2.display_name
                    );
                    return MatchDisposition::UnresolvedWinner;
                }
            }
            None => SideResult::Draw,
        };

        self.record(id1, id2, side1_result);
        self.record(id2, id1, side1_result.opposite());

        MatchDisposition::Counted {
            side1: side1_result,
        }
    }

    fn ensure_archetype(&mut self, label: &str) -> ArchetypeId {
        let id = self.registry.intern(label);
        if id.index() == self.tallies.len() {
            self.tallies.push(ArchetypeTally::default());
        }
        id
    }

    fn record(&mut self, archetype: ArchetypeId, opponent: ArchetypeId, result: SideResult) {
        let tally = &mut self.tallies[archetype.index()];
        tally.overall.record(result);
        tally.matchups.entry(opponent).or_default().record(result);
    }

    /// Hand off raw counts and the run report.
    pub fn into_parts(self) -> (TournamentTally, AggregationReport) {
        let Aggregator {
            registry,
            tallies,
            mut report,
            ..
        } = self;

        let mut archetypes = BTreeMap::new();
        for ((_, name), tally) in registry.iter().zip(tallies) {
            let name = name.to_string();
            let mut stats = ArchetypeStats::new(name.clone());
            stats.wins = tally.overall.wins;
            stats.losses = tally.overall.losses;
            stats.draws = tally.overall.draws;
            stats.matchups = tally
                .matchups
                .into_iter()
                .map(|(opponent, counts)| (registry.name(opponent).to_string(), counts))
                .collect();
            archetypes.insert(name, stats);
        }

        report.suspect_archetype_labels = registry.suspect_duplicates().to_vec();
        (TournamentTally::from_archetypes(archetypes), report)
    }

    /// Hand off raw counts for merging with other partial runs.
    pub fn into_tally(self) -> TournamentTally {
        self.into_parts().0
    }

    /// Finalize the statistics for this batch.
    pub fn finish(self) -> (TournamentStats, AggregationReport) {
        let (tally, report) = self.into_parts();
        let stats = tally.finalize();

        info!(
            "Aggregated {} of {} matches into {} archetypes ({} skipped, {} unresolved winners)",
            report.matches_counted,
            report.matches_seen,
            stats.archetypes.len(),
            report.skipped(),
            report.unresolved_winners
        );

        (stats, report)
    }
}

/// Aggregate a batch of matches into finalized statistics.
pub fn aggregate<'m, I>(matches: I, archetype_map: &PlayerArchetypeMap) -> TournamentStats
where
    I: IntoIterator<Item = &'m MatchRecord>,
{
    aggregate_with_report(matches, archetype_map).0
}

/// Aggregate a batch of matches, also returning data-quality counters.
pub fn aggregate_with_report<'m, I>(
    matches: I,
    archetype_map: &PlayerArchetypeMap,
) -> (TournamentStats, AggregationReport)
where
    I: IntoIterator<Item = &'m MatchRecord>,
{
    let mut aggregator = Aggregator::new(archetype_map);
    aggregator.add_matches(matches);
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Competitor;
    use pretty_assertions::assert_eq;

    fn map(entries: &[(&str, &str)]) -> PlayerArchetypeMap {
        entries
            .iter()
            .map(|(p, a)| (p.to_string(), a.to_string()))
            .collect()
    }

    fn game(p1: &str, p2: &str, result: &str) -> MatchRecord {
        MatchRecord::new(Competitor::new(p1), Competitor::new(p2), result)
    }

    fn assert_symmetric(stats: &TournamentStats) {
        for (x, x_stats) in &stats.archetypes {
            for (y, xy) in &x_stats.matchups {
                let yx = &stats.archetypes[y].matchups[x];
                assert_eq!(xy.wins, yx.losses, "{} vs {} wins", x, y);
                assert_eq!(xy.losses, yx.wins, "{} vs {} losses", x, y);
                assert_eq!(xy.draws, yx.draws, "{} vs {} draws", x, y);
            }
        }
    }

    #[test]
    fn test_scenario_split_rounds() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue")]);
        let matches = vec![
            game("Alice", "Bob", "Alice won 2-0-0").with_round(1),
            game("Alice", "Bob", "Bob won 2-1-0").with_round(2),
        ];

        let stats = aggregate(&matches, &archetypes);

        let red = &stats.archetypes["Red"];
        assert_eq!((red.wins, red.losses, red.draws), (1, 1, 0));
        assert_eq!(red.win_rate, 50.0);

        let blue = &stats.archetypes["Blue"];
        assert_eq!((blue.wins, blue.losses, blue.draws), (1, 1, 0));
        assert_eq!(blue.win_rate, 50.0);

        assert_eq!(
            red.matchups["Blue"],
            MatchupStats {
                wins: 1,
                losses: 1,
                draws: 0,
                percentage: 50.0,
            }
        );
        assert_symmetric(&stats);
    }

    #[test]
    fn test_scenario_draw_by_score() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue")]);
        let matches = vec![game("Alice", "Bob", "1-1-0 Draw")];

        let stats = aggregate(&matches, &archetypes);

        for name in ["Red", "Blue"] {
            let a = &stats.archetypes[name];
            assert_eq!((a.wins, a.losses, a.draws), (0, 0, 1));
            assert_eq!(a.win_rate, 0.0);
        }
        assert_eq!(stats.archetypes["Red"].matchups["Blue"].draws, 1);
        assert_symmetric(&stats);
    }

    #[test]
    fn test_scenario_unknown_archetype_skipped() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue")]);
        let matches = vec![
            game("Alice", "Bob", "Alice won 2-0-0"),
            game("Alice", "Carol", "Carol won 2-0-0"),
        ];

        let (stats, report) = aggregate_with_report(&matches, &archetypes);

        let red = &stats.archetypes["Red"];
        assert_eq!((red.wins, red.losses, red.draws), (1, 0, 0));
        assert_eq!(stats.archetypes.len(), 2);
        assert_eq!(report.skipped_unknown_archetype, 1);
        assert_eq!(report.matches_counted, 1);
    }

    #[test]
    fn test_scenario_draws_only_zero_win_rate() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue")]);
        let matches = vec![
            game("Alice", "Bob", "1-1-1 Draw"),
            game("Alice", "Bob", "0-0-3 Draw"),
        ];

        let stats = aggregate(&matches, &archetypes);
        let red = &stats.archetypes["Red"];
        assert_eq!(red.draws, 2);
        assert_eq!(red.win_rate, 0.0);
        assert_eq!(red.matchups["Blue"].percentage, 0.0);
    }

    #[test]
    fn test_missing_competitor_and_empty_name_skipped() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue")]);
        let lone = MatchRecord {
            round: Some(1),
            competitors: vec![Competitor::new("Alice")],
            result: "Alice won 2-0-0".to_string(),
        };
        let matches = vec![lone, game("Alice", "", "Alice won 2-0-0"), game("  ", "Bob", "1-1-0")];

        let mut aggregator = Aggregator::new(&archetypes);
        assert_eq!(
            aggregator.add_match(&matches[0]),
            MatchDisposition::Skipped(SkipReason::MissingCompetitor)
        );
        assert_eq!(
            aggregator.add_match(&matches[1]),
            MatchDisposition::Skipped(SkipReason::EmptyName)
        );
        assert_eq!(
            aggregator.add_match(&matches[2]),
            MatchDisposition::Skipped(SkipReason::EmptyName)
        );

        let (stats, report) = aggregator.finish();
        assert!(stats.is_empty());
        assert_eq!(report.skipped(), 3);
        assert_eq!(report.matches_seen, 3);
    }

    #[test]
    fn test_winner_matched_by_normalized_name() {
        let archetypes = map(&[("Jane Doe", "Red"), ("John Roe", "Blue")]);
        let matches = vec![game("Jane  Doe", "John Roe", "JANE DOE won 2-1-0")];

        let stats = aggregate(&matches, &archetypes);
        assert_eq!(stats.archetypes["Red"].wins, 1);
        assert_eq!(stats.archetypes["Blue"].losses, 1);
    }

    #[test]
    fn test_side_two_winner() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue")]);
        let mut aggregator = Aggregator::new(&archetypes);
        let disposition = aggregator.add_match(&game("Alice", "Bob", "Bob won 2-0-1"));
        assert_eq!(
            disposition,
            MatchDisposition::Counted {
                side1: SideResult::Loss
            }
        );
    }

    #[test]
    fn test_unresolved_winner_not_attributed() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue")]);
        let matches = vec![game("Alice", "Bob", "Mallory won 2-0-0")];

        let (stats, report) = aggregate_with_report(&matches, &archetypes);

        assert_eq!(report.unresolved_winners, 1);
        assert_eq!(report.matches_counted, 0);
        for name in ["Red", "Blue"] {
            let a = &stats.archetypes[name];
            assert_eq!(a.total(), 0);
            assert!(a.matchups.is_empty());
        }
    }

    #[test]
    fn test_unparseable_result_skipped() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue"), ("Carol", "Green")]);
        let matches = vec![
            game("Alice", "Bob", "Not reported"),
            game("Alice", "Carol", "Alice won 2-0-0"),
        ];

        let mut aggregator = Aggregator::new(&archetypes);
        assert_eq!(
            aggregator.add_match(&matches[0]),
            MatchDisposition::Skipped(SkipReason::UnparseableResult)
        );
        aggregator.add_match(&matches[1]);
        let (stats, report) = aggregator.finish();

        assert_eq!(report.unparseable_results, 1);
        assert_eq!(report.matches_counted, 1);
        assert_eq!(report.skipped(), 1);
        assert!(!stats.archetypes.contains_key("Blue"));

        let red = &stats.archetypes["Red"];
        assert_eq!((red.wins, red.losses, red.draws), (1, 0, 0));
        assert!(!red.matchups.contains_key("Blue"));
    }

    #[test]
    fn test_mirror_match() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Red")]);
        let matches = vec![
            game("Alice", "Bob", "Alice won 2-0-0"),
            game("Alice", "Bob", "1-1-0 Draw"),
        ];

        let stats = aggregate(&matches, &archetypes);
        let red = &stats.archetypes["Red"];
        assert_eq!((red.wins, red.losses, red.draws), (1, 1, 2));
        assert_eq!(red.win_rate, 50.0);
        assert_eq!(red.matchups["Red"].record_string(), "1-1-2");
        assert_symmetric(&stats);
    }

    #[test]
    fn test_player_id_resolution() {
        let mut archetypes = PlayerArchetypeMap::new();
        archetypes.insert_id(1, "Red");
        archetypes.insert_id(2, "Blue");
        let matches = vec![MatchRecord::new(
            Competitor::new("Alice").with_player_id(1),
            Competitor::new("Bob").with_player_id(2),
            "Alice won 2-1-0",
        )];

        let stats = aggregate(&matches, &archetypes);
        assert_eq!(stats.archetypes["Red"].wins, 1);
        assert_eq!(stats.archetypes["Blue"].losses, 1);
    }

    #[test]
    fn test_archetype_labels_not_folded() {
        let archetypes = map(&[("Alice", "Mono Red"), ("Bob", "mono red"), ("Carol", "Blue")]);
        let matches = vec![
            game("Alice", "Carol", "Alice won 2-0-0"),
            game("Bob", "Carol", "Bob won 2-0-0"),
        ];

        let (stats, report) = aggregate_with_report(&matches, &archetypes);
        assert_eq!(stats.archetypes["Mono Red"].wins, 1);
        assert_eq!(stats.archetypes["mono red"].wins, 1);
        assert_eq!(
            report.suspect_archetype_labels,
            vec![("Mono Red".to_string(), "mono red".to_string())]
        );
    }

    #[test]
    fn test_sum_invariant() {
        let archetypes = map(&[
            ("Alice", "Red"),
            ("Bob", "Blue"),
            ("Carol", "Green"),
            ("Dave", "Blue"),
        ]);
        let matches = vec![
            game("Alice", "Bob", "Alice won 2-0-0"),
            game("Carol", "Dave", "1-1-1 Draw"),
            game("Alice", "Carol", "Carol won 2-1-0"),
            game("Bob", "Dave", "Dave won 2-0-0"),
            game("Bob", "Erin", "Bob won 2-0-0"),
        ];

        let stats = aggregate(&matches, &archetypes);

        // Appearances per archetype among resolvable matches (mirror counts twice)
        let expected = [("Red", 2), ("Blue", 4), ("Green", 2)];
        for (name, appearances) in expected {
            assert_eq!(stats.archetypes[name].total(), appearances, "{}", name);
        }
        assert_symmetric(&stats);
    }

    #[test]
    fn test_partial_tallies_merge_to_whole() {
        let archetypes = map(&[("Alice", "Red"), ("Bob", "Blue"), ("Carol", "Green")]);
        let round1 = vec![
            game("Alice", "Bob", "Alice won 2-0-0"),
            game("Carol", "Bob", "1-1-0 Draw"),
        ];
        let round2 = vec![
            game("Bob", "Alice", "Bob won 2-1-0"),
            game("Carol", "Alice", "Carol won 2-0-0"),
        ];

        let whole = aggregate(round1.iter().chain(round2.iter()), &archetypes);

        let mut first = Aggregator::new(&archetypes);
        first.add_matches(&round1);
        let mut second = Aggregator::new(&archetypes);
        second.add_matches(&round2);

        let mut tally = second.into_tally();
        tally.merge(first.into_tally());

        assert_eq!(tally.finalize(), whole);
    }

    #[test]
    fn test_empty_batch() {
        let archetypes = map(&[("Alice", "Red")]);
        let (stats, report) = aggregate_with_report(&Vec::<MatchRecord>::new(), &archetypes);
        assert!(stats.is_empty());
        assert_eq!(report, AggregationReport::default());
    }
}
