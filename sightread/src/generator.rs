// Bar-by-bar generation of practice staves.
//
// For each staff the generator walks `num_bars` bars. Each bar takes one
// pattern from the rhythm catalog, then one pitch per duration slot. With
// `distinct_adjacent` set, a pitch equal to the staff's previous pitch is
// redrawn; the previous pitch carries across bar lines but never between
// staves. Validation has already guaranteed such a staff has at least two
// pitches, so the redraw loop terminates.
//
// Staves are generated one after another from the same random source, upper
// first. Rendering a `StaffStream` to text is separate from drawing it so the
// same sheet can feed both the LilyPond and MIDI writers.

use crate::config::{GenerationConfig, Layout, StaffPlan, StaffRole};
use crate::error::ConfigError;
use crate::lilypond;
use crate::pitch::pitch_name;
use crate::rhythm::{self, Duration};
use log::{debug, info};
use sightread_prng::RandomSource;

/// Line-break marker placed after every `bars_per_line`-th bar.
pub const LINE_BREAK: &str = "\\break";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub pitch: u8,
    pub duration: Duration,
}

impl Note {
    /// LilyPond token, e.g. `c'4`.
    pub fn token(&self) -> String {
        format!("{}{}", pitch_name(self.pitch), self.duration.ly_symbol())
    }
}

/// One bar of notes whose durations fill the time signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub notes: Vec<Note>,
}

impl Bar {
    pub fn beats(&self) -> u8 {
        self.notes.iter().map(|n| n.duration.beats()).sum()
    }

    pub fn render(&self) -> String {
        self.notes
            .iter()
            .map(Note::token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The bars of one staff plus its line-wrap interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffStream {
    pub bars: Vec<Bar>,
    pub bars_per_line: u32,
}

impl StaffStream {
    /// Bar and break tokens in output order.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.bars.len() * 2);
        for (i, bar) in self.bars.iter().enumerate() {
            tokens.push(bar.render());
            let count = i as u32 + 1;
            if self.bars_per_line != 0 && count % self.bars_per_line == 0 {
                tokens.push(LINE_BREAK.to_string());
            }
        }
        tokens
    }

    pub fn render(&self) -> String {
        self.tokens().join(" ")
    }

    /// Every note of the staff in order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.bars.iter().flat_map(|b| b.notes.iter())
    }
}

/// A generated exercise, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub layout: Layout,
    pub beats_per_bar: u8,
    /// Top to bottom; two for `Grand` and `TwoTreble`, one for `Beats`.
    pub staves: Vec<StaffStream>,
}

/// Validate `config` and draw a sheet from `rng`.
pub fn generate<R: RandomSource>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Sheet, ConfigError> {
    config.validate()?;

    let staves = config
        .staves()
        .iter()
        .map(|plan| generate_staff(config, plan, rng))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "generated {} bar(s) of {}/4 on {} staff(s), layout {}",
        config.num_bars,
        config.beats_per_bar,
        staves.len(),
        config.layout.name()
    );

    Ok(Sheet {
        layout: config.layout,
        beats_per_bar: config.beats_per_bar,
        staves,
    })
}

/// Validate, generate and render the LilyPond document in one step.
pub fn generate_document<R: RandomSource>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<String, ConfigError> {
    let sheet = generate(config, rng)?;
    Ok(lilypond::render_document(&sheet))
}

fn generate_staff<R: RandomSource>(
    config: &GenerationConfig,
    plan: &StaffPlan,
    rng: &mut R,
) -> Result<StaffStream, ConfigError> {
    let patterns = rhythm::patterns(config.beats_per_bar, plan.level).ok_or_else(|| {
        ConfigError::MissingRhythmCatalog {
            staff: plan.name,
            beats: config.beats_per_bar,
            level: plan.level,
            available: rhythm::levels_for(config.beats_per_bar),
        }
    })?;

    let mut bars = Vec::with_capacity(config.num_bars as usize);
    let mut last_pitch: Option<u8> = None;
    let mut redraws = 0usize;

    for _ in 0..config.num_bars {
        let pattern = *rng.choose(patterns);
        debug_assert_eq!(rhythm::pattern_beats(pattern), config.beats_per_bar);
        let mut notes = Vec::with_capacity(pattern.len());
        for &duration in pattern {
            let pitch = match plan.role {
                StaffRole::Rhythm { pitch } => pitch,
                StaffRole::Melodic(range) => {
                    let mut pitch = draw_pitch(rng, range.lower, range.upper);
                    while config.distinct_adjacent && Some(pitch) == last_pitch {
                        redraws += 1;
                        pitch = draw_pitch(rng, range.lower, range.upper);
                    }
                    pitch
                }
            };
            last_pitch = Some(pitch);
            notes.push(Note { pitch, duration });
        }
        bars.push(Bar { notes });
    }

    debug!(
        "{} staff: {} bar(s), {} note(s), {} redraw(s)",
        plan.name,
        bars.len(),
        bars.iter().map(|b| b.notes.len()).sum::<usize>(),
        redraws
    );

    Ok(StaffStream {
        bars,
        bars_per_line: config.bars_per_line,
    })
}

fn draw_pitch<R: RandomSource>(rng: &mut R, lower: u8, upper: u8) -> u8 {
    rng.range_usize_inclusive(lower as usize, upper as usize) as u8
}
