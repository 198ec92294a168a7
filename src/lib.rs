//! # Matchup Stats
//!
//! Archetype win rates and head-to-head matchup statistics from tournament
//! match records.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, outcomes, stats)
//! - **calculate**: Result parsing, name normalization, aggregation engine
//! - **ingest**: Conversion of provider round payloads into match records
//! - **storage**: Per-tournament JSON files in the data directory
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod storage;

pub use models::*;

use std::collections::HashSet;

use thiserror::Error;

/// Rounds used when no selection is given.
pub const DEFAULT_ROUNDS: [u32; 5] = [4, 5, 6, 7, 8];

/// Errors from parsing a round selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundsError {
    #[error("invalid round number: {0:?}")]
    InvalidNumber(String),

    #[error("invalid range format: {0:?}")]
    InvalidRange(String),

    #[error("invalid range {0:?}: start > end")]
    ReversedRange(String),
}

/// Parse a round selection (e.g., "4-8", "4,5,6", "4-8,12-16").
///
/// Duplicates are dropped, first occurrence wins the position.
pub fn parse_rounds(s: &str) -> Result<Vec<u32>, RoundsError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(DEFAULT_ROUNDS.to_vec());
    }

    let mut rounds = Vec::new();
    let mut seen = HashSet::new();
    let mut push = |round: u32| {
        if seen.insert(round) {
            rounds.push(round);
        }
    };

    for segment in s.split(',').map(str::trim) {
        let number = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| RoundsError::InvalidNumber(part.trim().to_string()))
        };

        if segment.contains('-') {
            let parts: Vec<&str> = segment.split('-').collect();
            let [start, end] = parts.as_slice() else {
                return Err(RoundsError::InvalidRange(segment.to_string()));
            };
            let (start, end) = (number(*start)?, number(*end)?);
            if start > end {
                return Err(RoundsError::ReversedRange(segment.to_string()));
            }
            (start..=end).for_each(&mut push);
        } else {
            push(number(segment)?);
        }
    }

    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rounds_default() {
        assert_eq!(parse_rounds(""), Ok(vec![4, 5, 6, 7, 8]));
        assert_eq!(parse_rounds("  "), Ok(vec![4, 5, 6, 7, 8]));
    }

    #[test]
    fn test_parse_rounds_range() {
        assert_eq!(parse_rounds("4-8"), Ok(vec![4, 5, 6, 7, 8]));
    }

    #[test]
    fn test_parse_rounds_list() {
        assert_eq!(parse_rounds("4,5,6"), Ok(vec![4, 5, 6]));
    }

    #[test]
    fn test_parse_rounds_mixed() {
        assert_eq!(
            parse_rounds("4-6, 12-13, 17"),
            Ok(vec![4, 5, 6, 12, 13, 17])
        );
    }

    #[test]
    fn test_parse_rounds_dedup_keeps_first_position() {
        assert_eq!(parse_rounds("5,4-6,5"), Ok(vec![5, 4, 6]));
    }

    #[test]
    fn test_parse_rounds_wide_range() {
        let rounds = parse_rounds("3,1-200000,7").unwrap();
        assert_eq!(rounds.len(), 200_000);
        assert_eq!(&rounds[..3], &[3, 1, 2]);
        assert_eq!(rounds.last(), Some(&200_000));
    }

    #[test]
    fn test_parse_rounds_single_round_range() {
        assert_eq!(parse_rounds("7-7"), Ok(vec![7]));
    }

    #[test]
    fn test_parse_rounds_invalid_number() {
        assert_eq!(
            parse_rounds("4,x"),
            Err(RoundsError::InvalidNumber("x".to_string()))
        );
        assert!(parse_rounds("a-8").is_err());
    }

    #[test]
    fn test_parse_rounds_bad_range() {
        assert_eq!(
            parse_rounds("4-8-9"),
            Err(RoundsError::InvalidRange("4-8-9".to_string()))
        );
    }

    #[test]
    fn test_parse_rounds_reversed() {
        assert_eq!(
            parse_rounds("8-4"),
            Err(RoundsError::ReversedRange("8-4".to_string()))
        );
    }

    #[test]
    fn test_parse_rounds_trailing_comma() {
        assert_eq!(
            parse_rounds("4,"),
            Err(RoundsError::InvalidNumber(String::new()))
        );
    }
}
