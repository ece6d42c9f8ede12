// Note durations and the rhythm pattern catalog.
//
// A bar is filled by picking one pattern from the catalog entry keyed by
// (beats per bar, difficulty level). Beats are counted in quarter notes, and
// every pattern in an entry sums to exactly that many beats.
//
// Levels grow the vocabulary: level 1 is all quarters, level 2 adds the
// longer values that fit the bar (whole, half and dotted half in 4/4; half
// and dotted half in 3/4), levels 3 and 4 drill a single long value, and
// level 5 (4/4 only) adds the half-note placements within the bar.

use serde::{Deserialize, Serialize};

/// A note value usable inside one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Duration {
    Whole,
    DottedHalf,
    Half,
    Quarter,
}

impl Duration {
    /// Length in quarter-note beats.
    pub fn beats(self) -> u8 {
        match self {
            Duration::Whole => 4,
            Duration::DottedHalf => 3,
            Duration::Half => 2,
            Duration::Quarter => 1,
        }
    }

    /// LilyPond duration suffix.
    pub fn ly_symbol(self) -> &'static str {
        match self {
            Duration::Whole => "1",
            Duration::DottedHalf => "2.",
            Duration::Half => "2",
            Duration::Quarter => "4",
        }
    }
}

/// An ordered sequence of durations filling one bar.
pub type Pattern = &'static [Duration];

use Duration::{DottedHalf as D2, Half as H, Quarter as Q, Whole as W};

const FOUR_QUARTERS: Pattern = &[Q, Q, Q, Q];
const THREE_QUARTERS: Pattern = &[Q, Q, Q];

const CATALOG: &[((u8, u8), &[Pattern])] = &[
    ((4, 1), &[FOUR_QUARTERS]),
    ((4, 2), &[FOUR_QUARTERS, &[W], &[H, H], &[D2, Q], &[Q, D2]]),
    ((4, 3), &[&[W]]),
    ((4, 4), &[&[H, H]]),
    (
        (4, 5),
        &[
            FOUR_QUARTERS,
            &[W],
            &[H, H],
            &[D2, Q],
            &[Q, D2],
            &[H, Q, Q],
            &[Q, H, Q],
            &[Q, Q, H],
        ],
    ),
    ((3, 1), &[THREE_QUARTERS]),
    ((3, 2), &[THREE_QUARTERS, &[H, Q], &[Q, H], &[D2]]),
];

/// Candidate patterns for a (beats per bar, level) pair, if the catalog has
/// that entry.
pub fn patterns(beats_per_bar: u8, level: u8) -> Option<&'static [Pattern]> {
    CATALOG
        .iter()
        .find(|(key, _)| *key == (beats_per_bar, level))
        .map(|(_, entry)| *entry)
}

/// Total beats of a pattern.
pub fn pattern_beats(pattern: &[Duration]) -> u8 {
    pattern.iter().map(|d| d.beats()).sum()
}

/// Difficulty levels available for a time signature, ascending.
pub fn levels_for(beats_per_bar: u8) -> Vec<u8> {
    let mut levels: Vec<u8> = CATALOG
        .iter()
        .filter(|((beats, _), _)| *beats == beats_per_bar)
        .map(|((_, level), _)| *level)
        .collect();
    levels.sort_unstable();
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_fills_its_bar() {
        for ((beats, level), entry) in CATALOG {
            assert!(!entry.is_empty(), "empty entry ({beats},{level})");
            for pattern in entry.iter() {
                assert_eq!(
                    pattern_beats(pattern),
                    *beats,
                    "pattern {pattern:?} in ({beats},{level}) does not fill the bar"
                );
            }
        }
    }

    #[test]
    fn test_catalog_keys_unique() {
        for (i, (a, _)) in CATALOG.iter().enumerate() {
            for (b, _) in &CATALOG[i + 1..] {
                assert_ne!(a, b, "duplicate catalog key");
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(patterns(4, 1), Some(&[FOUR_QUARTERS][..]));
        assert_eq!(patterns(4, 5).map(<[_]>::len), Some(8));
        assert_eq!(patterns(3, 2).map(<[_]>::len), Some(4));
        assert!(patterns(3, 5).is_none());
        assert!(patterns(5, 1).is_none());
    }

    #[test]
    fn test_three_four_level_two_fits_three_beats() {
        let entry = patterns(3, 2).unwrap();
        assert!(entry.iter().any(|p| *p == [D2]), "{entry:?}");
        assert!(entry.iter().any(|p| *p == [H, Q]), "{entry:?}");
        for pattern in entry {
            assert_eq!(pattern_beats(pattern), 3, "{pattern:?}");
            assert!(!pattern.contains(&W), "whole note in 3/4: {pattern:?}");
        }
    }

    #[test]
    fn test_levels_for() {
        assert_eq!(levels_for(4), vec![1, 2, 3, 4, 5]);
        assert_eq!(levels_for(3), vec![1, 2]);
        assert!(levels_for(6).is_empty());
    }

    #[test]
    fn test_ly_symbols() {
        let symbols: Vec<&str> = [W, D2, H, Q].iter().map(|d| d.ly_symbol()).collect();
        assert_eq!(symbols, vec!["1", "2.", "2", "4"]);
    }
}
