// The pitch table: 29 natural pitches from C2 to C6 in LilyPond absolute
// notation.
//
// A staff's range is a pair of indices into this table. The layout is seven
// naturals per octave, so index 14 is middle C (`c'`), 0 is the C two ledger
// lines below the bass clef and 28 the C two ledger lines above the treble
// clef. Common ranges: bass clef roughly (4, 12), treble clef (16, 24).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// LilyPond note names, lowest first.
pub const PITCH_TABLE: [&str; 29] = [
    "c,", "d,", "e,", "f,", "g,", "a,", "b,", //
    "c", "d", "e", "f", "g", "a", "b", //
    "c'", "d'", "e'", "f'", "g'", "a'", "b'", //
    "c''", "d''", "e''", "f''", "g''", "a''", "b''", //
    "c'''",
];

/// Highest valid pitch index.
pub const MAX_PITCH: u8 = (PITCH_TABLE.len() - 1) as u8;

/// Index of middle C.
pub const MIDDLE_C: u8 = 14;

/// Pitch used for every note of a rhythm-only staff (the middle line of the
/// treble staff).
pub const RHYTHM_PITCH: u8 = 20;

/// Semitone offsets of the seven naturals within an octave.
const NATURAL_SEMITONES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// LilyPond name of a pitch index. Callers pass validated indices.
pub fn pitch_name(index: u8) -> &'static str {
    PITCH_TABLE[index as usize]
}

/// MIDI note number of a pitch index (middle C = 60).
pub fn pitch_to_midi(index: u8) -> u8 {
    let octave = index / 7;
    let step = (index % 7) as usize;
    36 + 12 * octave + NATURAL_SEMITONES[step]
}

/// An inclusive range of pitch indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRange {
    pub lower: u8,
    pub upper: u8,
}

impl PitchRange {
    pub const fn new(lower: u8, upper: u8) -> Self {
        Self { lower, upper }
    }

    /// Number of pitches in the range. Only meaningful once validated.
    pub fn width(&self) -> usize {
        (self.upper as usize + 1).saturating_sub(self.lower as usize)
    }

    pub fn contains(&self, index: u8) -> bool {
        (self.lower..=self.upper).contains(&index)
    }

    /// Check both bounds index the pitch table and are ordered.
    pub fn validate(&self, staff: &'static str) -> Result<(), ConfigError> {
        for index in [self.lower, self.upper] {
            if index > MAX_PITCH {
                return Err(ConfigError::PitchOutOfRange {
                    staff,
                    index,
                    max: MAX_PITCH,
                });
            }
        }
        if self.lower > self.upper {
            return Err(ConfigError::InvertedRange {
                staff,
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}
