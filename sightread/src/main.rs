// Sight-reading sheet generator, CLI entry point.
//
// Builds a GenerationConfig from flags, a named/numbered profile, or a JSON
// file, generates a sheet and prints the LilyPond document (or writes it to
// --output). Progress and the seed go to the log on stderr, so stdout can be
// piped straight into `lilypond -`.
//
// Usage:
//   cargo run -p sightread -- -f 2Treble -B 14 18 -T 21 25 -t 4 -l 1 1 -n 256
//   cargo run -p sightread -- -p 1
//   cargo run -p sightread -- -P 1To5 --seed 7 --midi drill.mid
//   cargo run -p sightread -- -f Beats -l 5 5 -n 128
//
// Pitch indices: 0 = C2 (two ledger lines below the bass clef), 14 = middle
// C, 28 = C6 (two ledger lines above the treble clef). Bass clef is roughly
// (4, 12), treble clef (16, 24).

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use sightread::config::{GenerationConfig, Layout, StaffConfig};
use sightread::pitch::PitchRange;
use sightread::{SheetRng, generate, lilypond, midi, profile};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[clap(author, about = "Generate random sight-reading exercises as LilyPond", long_about = None)]
struct Args {
    /// Staff layout: Grand, 2Treble or Beats
    #[clap(short = 'f', long, default_value = "Grand", value_parser = parse_layout)]
    format: Layout,

    /// Number of bars
    #[clap(short = 'n', long, default_value_t = 16)]
    number: u32,

    /// Upper (treble) staff pitch range
    #[clap(short = 'T', long, num_args = 2, value_names = ["LO", "HI"], default_values_t = [7u8, 11])]
    treble: Vec<u8>,

    /// Lower (bass) staff pitch range
    #[clap(short = 'B', long, num_args = 2, value_names = ["LO", "HI"], default_values_t = [0u8, 4])]
    bass: Vec<u8>,

    /// Bars per line, 0 to let LilyPond decide
    #[clap(short = 'b', long, default_value_t = 0)]
    bar: u32,

    /// Beats per bar
    #[clap(short = 't', long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(3..=4))]
    time: u8,

    /// Difficulty level for the upper and lower staff
    #[clap(short = 'l', long, num_args = 2, value_names = ["UPPER", "LOWER"], default_values_t = [1u8, 1])]
    level: Vec<u8>,

    /// Pick a profile by number (see --list-profiles)
    #[clap(short = 'p', long, conflicts_with_all = ["profile_name", "config"])]
    #[clap(conflicts_with_all = SHEET_FLAGS)]
    profile: Option<usize>,

    /// Pick a profile by name
    #[clap(short = 'P', long, conflicts_with = "config")]
    #[clap(conflicts_with_all = SHEET_FLAGS)]
    profile_name: Option<String>,

    /// Make adjacent notes of a staff different
    #[clap(short = 'u', long)]
    unique: bool,

    /// Load the generation config from a JSON file
    #[clap(long, conflicts_with_all = SHEET_FLAGS)]
    config: Option<PathBuf>,

    /// Save the resolved config as JSON, then generate as usual
    #[clap(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// Print the resolved config as JSON and exit
    #[clap(long)]
    dump_config: bool,

    /// List the available profiles and exit
    #[clap(long)]
    list_profiles: bool,

    /// Seed for reproducible sheets (default: from the clock)
    #[clap(long)]
    seed: Option<u64>,

    /// Write the LilyPond document here instead of stdout
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// Also write a MIDI rendition of the sheet
    #[clap(long)]
    midi: Option<PathBuf>,

    /// MIDI playback tempo in BPM
    #[clap(long, default_value_t = midi::DEFAULT_TEMPO_BPM)]
    #[clap(value_parser = clap::value_parser!(u16).range(i64::from(midi::MIN_TEMPO_BPM)..))]
    tempo: u16,
}

/// Flags describing a sheet directly. A profile or config file already
/// describes the whole sheet, so these cannot be combined with one.
const SHEET_FLAGS: [&str; 7] = ["format", "number", "treble", "bass", "bar", "time", "level"];

fn parse_layout(s: &str) -> Result<Layout, String> {
    Layout::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = Layout::ALL.iter().map(|l| l.name()).collect();
        format!("unknown format '{}', expected one of {}", s, names.join(", "))
    })
}

fn resolve_config(args: &Args) -> anyhow::Result<GenerationConfig> {
    let mut config = if let Some(path) = &args.config {
        GenerationConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?
    } else if let Some(number) = args.profile {
        profile::by_number(number)?.config
    } else if let Some(name) = &args.profile_name {
        profile::by_name(name)?.config
    } else {
        let [t_lo, t_hi] = pair(&args.treble, "--treble")?;
        let [b_lo, b_hi] = pair(&args.bass, "--bass")?;
        let [upper_level, lower_level] = pair(&args.level, "--level")?;
        GenerationConfig {
            layout: args.format,
            upper: StaffConfig {
                range: PitchRange::new(t_lo, t_hi),
                level: upper_level,
            },
            lower: StaffConfig {
                range: PitchRange::new(b_lo, b_hi),
                level: lower_level,
            },
            beats_per_bar: args.time,
            num_bars: args.number,
            bars_per_line: args.bar,
            distinct_adjacent: false,
        }
    };
    config.distinct_adjacent |= args.unique;
    Ok(config)
}

fn pair(values: &[u8], flag: &str) -> anyhow::Result<[u8; 2]> {
    match values {
        [a, b] => Ok([*a, *b]),
        _ => bail!("{} takes exactly two values", flag),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_profiles {
        for (i, p) in profile::profiles().iter().enumerate() {
            println!(
                "{:>2}  {:<16} {} {}/4, {} bars",
                i + 1,
                p.name,
                p.config.layout.name(),
                p.config.beats_per_bar,
                p.config.num_bars
            );
        }
        return Ok(());
    }

    let config = resolve_config(&args)?;
    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("saved config to {}", path.display());
    }
    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("seed {}", seed);
    let mut rng = SheetRng::new(seed);
    let sheet = generate(&config, &mut rng)?;

    match &args.output {
        Some(path) => {
            lilypond::write_lilypond(&sheet, path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", lilypond::render_document(&sheet)),
    }

    if let Some(path) = &args.midi {
        midi::write_midi(&sheet, args.tempo, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("sightread").chain(args.iter().copied()))
    }

    #[test]
    fn test_sheet_flags_conflict_with_profile_and_config() {
        let sources: [&[&str]; 3] = [&["-p", "1"], &["-P", "1To5"], &["--config", "drill.json"]];
        let flags: [&[&str]; 4] = [&["-n", "8"], &["-f", "Beats"], &["-T", "14", "18"], &["-l", "2", "2"]];
        for source in sources {
            for flag in flags {
                let args: Vec<&str> = source.iter().chain(flag).copied().collect();
                let err = parse(&args).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{args:?}");
            }
        }
    }

    #[test]
    fn test_profile_takes_unique_and_output_flags() {
        let args = parse(&["-p", "1", "-u", "--seed", "3", "-o", "out.ly"]).unwrap();
        let config = resolve_config(&args).unwrap();
        let mut expected = profile::by_number(1).unwrap().config;
        expected.distinct_adjacent = true;
        assert_eq!(config, expected);
    }

    #[test]
    fn test_flags_build_config() {
        let args = parse(&["-f", "2Treble", "-T", "21", "25", "-B", "14", "18", "-n", "8", "-t", "3"])
            .unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.layout, Layout::TwoTreble);
        assert_eq!(config.upper.range, PitchRange::new(21, 25));
        assert_eq!(config.lower.range, PitchRange::new(14, 18));
        assert_eq!(config.num_bars, 8);
        assert_eq!(config.beats_per_bar, 3);
        assert!(!config.distinct_adjacent);
    }

    #[test]
    fn test_tempo_range() {
        assert_eq!(parse(&[]).unwrap().tempo, midi::DEFAULT_TEMPO_BPM);
        assert_eq!(parse(&["--tempo", "4"]).unwrap().tempo, 4);
        for slow in ["0", "3"] {
            let err = parse(&["--tempo", slow]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "--tempo {slow}");
        }
    }

    #[test]
    fn test_save_config_writes_resolved_config() {
        let path = std::env::temp_dir().join(format!("sightread_cli_{}.json", std::process::id()));
        let path_arg = path.to_string_lossy().into_owned();
        let args = parse(&["-P", "1To5", "--save-config", &path_arg]).unwrap();
        let config = resolve_config(&args).unwrap();
        config.save(args.save_config.as_deref().unwrap()).unwrap();
        let loaded = GenerationConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, profile::by_name("1To5").unwrap().config);
    }
}
