// Generation settings and their validation.
//
// `GenerationConfig` is everything one run needs: layout, two staff
// settings, time signature, bar count, line wrapping and the distinct
// adjacent pitch switch. It is plain data, built by the CLI, taken from a
// profile (see `profile.rs`), or loaded from JSON.
//
// The layout decides which staves exist and what role each plays. `Grand`
// and `TwoTreble` draw both staves melodically; `Beats` uses only the upper
// staff's level and writes a fixed pitch. `validate` checks only the staves
// the layout actually uses.

use crate::error::{ConfigError, SheetError};
use crate::pitch::{PitchRange, RHYTHM_PITCH};
use crate::rhythm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output layout. Each variant has its own LilyPond template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Treble and bass clef joined in a PianoStaff.
    Grand,
    /// Two treble staves.
    #[serde(rename = "2Treble")]
    TwoTreble,
    /// One rhythm-only staff.
    Beats,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Grand, Layout::TwoTreble, Layout::Beats];

    /// Name used on the command line and in JSON.
    pub fn name(self) -> &'static str {
        match self {
            Layout::Grand => "Grand",
            Layout::TwoTreble => "2Treble",
            Layout::Beats => "Beats",
        }
    }

    pub fn from_name(name: &str) -> Option<Layout> {
        Layout::ALL.into_iter().find(|l| l.name() == name)
    }
}

/// Per-staff settings as given by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffConfig {
    pub range: PitchRange,
    /// Difficulty level, selects the rhythm catalog entry.
    pub level: u8,
}

/// What a staff contributes to the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRole {
    /// Random pitches from the range with random rhythm.
    Melodic(PitchRange),
    /// Random rhythm on one fixed pitch.
    Rhythm { pitch: u8 },
}

/// A staff as the generator sees it: name, role and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffPlan {
    pub name: &'static str,
    pub role: StaffRole,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub layout: Layout,
    /// Treble staff in `Grand`, first staff otherwise.
    pub upper: StaffConfig,
    /// Bass staff in `Grand`, second treble staff in `TwoTreble`. Unused by
    /// `Beats`.
    pub lower: StaffConfig,
    pub beats_per_bar: u8,
    pub num_bars: u32,
    /// Bars per printed line; 0 leaves line breaking to LilyPond.
    pub bars_per_line: u32,
    /// Never repeat the previous pitch of the same staff.
    pub distinct_adjacent: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Grand,
            upper: StaffConfig {
                range: PitchRange::new(7, 11),
                level: 1,
            },
            lower: StaffConfig {
                range: PitchRange::new(0, 4),
                level: 1,
            },
            beats_per_bar: 4,
            num_bars: 16,
            bars_per_line: 0,
            distinct_adjacent: false,
        }
    }
}

impl GenerationConfig {
    /// The staves this layout produces, top to bottom.
    pub fn staves(&self) -> Vec<StaffPlan> {
        match self.layout {
            Layout::Grand | Layout::TwoTreble => vec![
                StaffPlan {
                    name: "upper",
                    role: StaffRole::Melodic(self.upper.range),
                    level: self.upper.level,
                },
                StaffPlan {
                    name: "lower",
                    role: StaffRole::Melodic(self.lower.range),
                    level: self.lower.level,
                },
            ],
            Layout::Beats => vec![StaffPlan {
                name: "rhythm",
                role: StaffRole::Rhythm {
                    pitch: RHYTHM_PITCH,
                },
                level: self.upper.level,
            }],
        }
    }

    /// Check every constraint generation relies on. Returns the first
    /// problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_bars == 0 {
            return Err(ConfigError::InvalidBarCount(self.num_bars));
        }
        for staff in self.staves() {
            if rhythm::patterns(self.beats_per_bar, staff.level).is_none() {
                return Err(ConfigError::MissingRhythmCatalog {
                    staff: staff.name,
                    beats: self.beats_per_bar,
                    level: staff.level,
                    available: rhythm::levels_for(self.beats_per_bar),
                });
            }
            if let StaffRole::Melodic(range) = staff.role {
                range.validate(staff.name)?;
                if self.distinct_adjacent && range.width() < 2 {
                    return Err(ConfigError::DegenerateDistinct { staff: staff.name });
                }
            }
        }
        Ok(())
    }

    /// Read a config from a JSON file. The result is not validated.
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn to_json(&self) -> Result<String, SheetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SheetError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_bars_rejected() {
        let config = GenerationConfig {
            num_bars: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBarCount(0)));
    }

    #[test]
    fn test_missing_catalog_entry_names_staff() {
        let mut config = GenerationConfig {
            beats_per_bar: 3,
            ..Default::default()
        };
        config.lower.level = 4;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingRhythmCatalog {
                staff: "lower",
                beats: 3,
                level: 4,
                available: vec![1, 2],
            })
        );
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("available levels: [1, 2]"), "{message}");
    }

    #[test]
    fn test_single_pitch_with_distinct_rejected() {
        let mut config = GenerationConfig {
            distinct_adjacent: true,
            ..Default::default()
        };
        config.upper.range = PitchRange::new(0, 0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DegenerateDistinct { staff: "upper" })
        );

        // Without the flag a single pitch is fine.
        config.distinct_adjacent = false;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_beats_ignores_lower_staff_and_ranges() {
        let config = GenerationConfig {
            layout: Layout::Beats,
            upper: StaffConfig {
                range: PitchRange::new(5, 5),
                level: 5,
            },
            lower: StaffConfig {
                range: PitchRange::new(40, 2),
                level: 9,
            },
            distinct_adjacent: true,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
        let staves = config.staves();
        assert_eq!(staves.len(), 1);
        assert_eq!(staves[0].role, StaffRole::Rhythm { pitch: RHYTHM_PITCH });
        assert_eq!(staves[0].level, 5);
    }

    #[test]
    fn test_bad_range_reported_for_lower_staff() {
        let mut config = GenerationConfig::default();
        config.lower.range = PitchRange::new(4, 30);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::PitchOutOfRange { staff: "lower", index: 30, .. }));
    }

    #[test]
    fn test_layout_names() {
        for layout in Layout::ALL {
            assert_eq!(Layout::from_name(layout.name()), Some(layout));
        }
        assert_eq!(Layout::from_name("grand"), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GenerationConfig {
            layout: Layout::TwoTreble,
            bars_per_line: 5,
            distinct_adjacent: true,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"2Treble\""), "{json}");
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("sightread_config_{}.json", std::process::id()));
        let config = GenerationConfig::default();
        config.save(&path).unwrap();
        let loaded = GenerationConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
