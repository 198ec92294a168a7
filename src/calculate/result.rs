//! Match result string parsing.
//!
//! Result strings come in a handful of provider formats:
//! - "Guglielmo Lupi won 2-0-0"  (winner, winner games, loser games, drawn games)
//! - "1-1-0 Draw" / "Match was a draw 1-1-1"  (no winner, positional score)
//!
//! Matchers are tried in order; the first hit wins. Anything else is
//! [`ParsedOutcome::Unparseable`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::ParsedOutcome;

static WON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+won\s+([0-9]+)-([0-9]+)-([0-9]+)$").expect("valid regex")
});

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)-([0-9]+)-([0-9]+)").expect("valid regex"));

type Matcher = fn(&str) -> Option<ParsedOutcome>;

const MATCHERS: &[Matcher] = &[match_win_by_name, match_draw_by_score];

/// Parse a free-text match result.
pub fn parse_result(text: &str) -> ParsedOutcome {
    let text = text.trim();
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(text))
        .unwrap_or(ParsedOutcome::Unparseable)
}

fn score(caps: &Captures<'_>, first: usize) -> Option<(u32, u32, u32)> {
    let n = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    Some((n(first)?, n(first + 1)?, n(first + 2)?))
}

fn match_win_by_name(text: &str) -> Option<ParsedOutcome> {
    let caps = WON_RE.captures(text)?;
    let winner = caps.get(1)?.as_str().trim();
    if winner.is_empty() {
        return None;
    }
    let (winner_games, loser_games, draws) = score(&caps, 2)?;

    Some(ParsedOutcome::WinByName {
        winner: winner.to_string(),
        winner_games,
        loser_games,
        draws,
    })
}

fn match_draw_by_score(text: &str) -> Option<ParsedOutcome> {
    let caps = SCORE_RE.captures(text)?;
    let (side1_wins, side2_wins, draws) = score(&caps, 1)?;

    Some(ParsedOutcome::DrawByScore {
        side1_wins,
        side2_wins,
        draws,
    })
}
