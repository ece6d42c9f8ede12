// Error types for sheet generation.
//
// `ConfigError` covers everything detected while validating a
// `GenerationConfig` or resolving a profile. All of it is caught before the
// first random draw, so a failed run never produces partial output.
// `SheetError` is the wider error returned by operations that also touch
// files (config JSON, MIDI export).

use thiserror::Error;

/// Invalid or unresolvable generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bar count must be a positive integer, got {0}")]
    InvalidBarCount(u32),

    #[error("{staff} staff: pitch index {index} is outside the pitch table (0..={max})")]
    PitchOutOfRange {
        staff: &'static str,
        index: u8,
        max: u8,
    },

    #[error("{staff} staff: pitch range lower bound {lower} is above upper bound {upper}")]
    InvertedRange {
        staff: &'static str,
        lower: u8,
        upper: u8,
    },

    #[error(
        "{staff} staff: no rhythm patterns for {beats} beats per bar at level {level} \
         (available levels: {available:?})"
    )]
    MissingRhythmCatalog {
        staff: &'static str,
        beats: u8,
        level: u8,
        available: Vec<u8>,
    },

    /// Distinct adjacent pitches requested from a range holding one pitch.
    #[error("{staff} staff: distinct adjacent pitches need a range of at least two pitches")]
    DegenerateDistinct { staff: &'static str },

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("profile number {index} is out of range (1..={count})")]
    ProfileIndexOutOfRange { index: usize, count: usize },
}

/// Errors from generation plus the file formats around it.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MIDI encoding failed: {0}")]
    Midi(String),
}
