// Sight-Reading Sheet Generator
//
// Produces random practice exercises as LilyPond documents: bars of random
// rhythm patterns filled with random pitches from a chosen range, on a grand
// staff, two treble staves, or a single rhythm-only staff.
//
// Architecture:
// - pitch.rs: The 29-note pitch table (C2..C6 naturals) and pitch ranges
// - rhythm.rs: Durations and the (beats per bar, level) pattern catalog
// - config.rs: GenerationConfig, layouts, staff roles, validation, JSON I/O
// - profile.rs: Ordered named presets
// - generator.rs: Bar/staff generation and the Sheet model
// - lilypond.rs: Document templates and rendering
// - midi.rs: Standard MIDI File export of a sheet
// - error.rs: ConfigError / SheetError
//
// All randomness comes from a caller-supplied `RandomSource`, so a sheet is
// fully determined by its config and seed.

pub mod config;
pub mod error;
pub mod generator;
pub mod lilypond;
pub mod midi;
pub mod pitch;
pub mod profile;
pub mod rhythm;

pub use config::{GenerationConfig, Layout, StaffConfig};
pub use error::{ConfigError, SheetError};
pub use generator::{Sheet, generate, generate_document};
pub use pitch::PitchRange;
pub use sightread_prng::{RandomSource, SheetRng};
