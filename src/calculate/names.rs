//! Player name normalization.

/// Canonical player key: lower-cased, trimmed, inner whitespace collapsed.
///
/// Two display names belong to the same player iff their keys are equal.
pub fn normalize_player_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_player_name("  Jane   Doe "), "jane doe");
        assert_eq!(normalize_player_name("jane doe"), "jane doe");
        assert_eq!(normalize_player_name("Jane\tDoe\n"), "jane doe");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_player_name(""), "");
        assert_eq!(normalize_player_name("   "), "");
    }

    #[test]
    fn test_normalize_unicode_lowercase() {
        assert_eq!(normalize_player_name("JÖRG Müller"), "jörg müller");
    }

    #[test]
    fn test_distinct_spellings_stay_distinct() {
        assert_eq!(
            normalize_player_name("Marco  Belacca"),
            normalize_player_name("marco belacca")
        );
        assert_ne!(
            normalize_player_name("Marco Belacca"),
            normalize_player_name("Marco Bellacca")
        );
    }
}
