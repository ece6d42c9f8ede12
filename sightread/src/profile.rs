// Named presets.
//
// A profile is a complete `GenerationConfig` under a name. The list is
// ordered, so "profile 1" always means the first entry. Both presets drill
// five neighbouring notes per staff at level 1, written out over 256 bars in
// lines of five.

use crate::config::{GenerationConfig, Layout, StaffConfig};
use crate::error::ConfigError;
use crate::pitch::PitchRange;

/// A named preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub config: GenerationConfig,
}

/// Five-note drill shared by both presets.
fn five_note_drill(layout: Layout, upper: PitchRange, lower: PitchRange) -> GenerationConfig {
    GenerationConfig {
        layout,
        upper: StaffConfig {
            range: upper,
            level: 1,
        },
        lower: StaffConfig {
            range: lower,
            level: 1,
        },
        beats_per_bar: 4,
        num_bars: 256,
        bars_per_line: 5,
        distinct_adjacent: false,
    }
}

/// All presets, in lookup order.
pub fn profiles() -> Vec<Profile> {
    vec![
        Profile {
            name: "1To5TwoTreble",
            // C5-G5 over C4-G4
            config: five_note_drill(
                Layout::TwoTreble,
                PitchRange::new(21, 25),
                PitchRange::new(14, 18),
            ),
        },
        Profile {
            name: "1To5",
            // C4-G4 over C3-G3
            config: five_note_drill(
                Layout::Grand,
                PitchRange::new(14, 18),
                PitchRange::new(7, 11),
            ),
        },
    ]
}

pub fn by_name(name: &str) -> Result<Profile, ConfigError> {
    profiles()
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
}

/// Look a profile up by its 1-based position.
pub fn by_number(number: usize) -> Result<Profile, ConfigError> {
    let mut all = profiles();
    let count = all.len();
    if number == 0 || number > count {
        return Err(ConfigError::ProfileIndexOutOfRange {
            index: number,
            count,
        });
    }
    Ok(all.swap_remove(number - 1))
}
