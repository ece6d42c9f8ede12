// MIDI export of generated sheets.
//
// Writes a Standard MIDI File so a student can check their reading against a
// recording. SMF Format 1: track 0 carries tempo and time signature, then one
// track per staff on its own channel. Notes follow each other with no gaps;
// a note's length is its duration in quarter beats times TICKS_PER_QUARTER.
//
// Uses the `midly` crate for encoding.

use crate::error::SheetError;
use crate::generator::{Sheet, StaffStream};
use crate::pitch::pitch_to_midi;
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Default playback tempo.
pub const DEFAULT_TEMPO_BPM: u16 = 72;

/// Slowest tempo whose microseconds per quarter fit the 24-bit tempo field.
pub const MIN_TEMPO_BPM: u16 = 4;

const MAX_TEMPO_MICROSECONDS: u32 = 0xFF_FFFF;

/// Acoustic grand piano.
const PIANO_PROGRAM: u8 = 0;

const VELOCITY: u8 = 80;

/// Convert a sheet to MIDI and write it to a file.
pub fn write_midi(sheet: &Sheet, tempo_bpm: u16, path: &Path) -> Result<(), SheetError> {
    let smf = sheet_to_smf(sheet, tempo_bpm);
    let mut buf = Vec::new();
    smf.write(&mut buf)
        .map_err(|e| SheetError::Midi(e.to_string()))?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a sheet to an in-memory SMF.
pub fn sheet_to_smf(sheet: &Sheet, tempo_bpm: u16) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Tempos below MIN_TEMPO_BPM saturate at the slowest encodable tempo.
    let tempo_microseconds =
        (60_000_000 / u32::from(tempo_bpm.max(1))).min(MAX_TEMPO_MICROSECONDS);
    smf.tracks.push(vec![
        meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
        // numerator, denominator as a power of two, clocks per click,
        // 32nds per quarter
        meta(MetaMessage::TimeSignature(sheet.beats_per_bar, 2, 24, 8)),
        meta(MetaMessage::EndOfTrack),
    ]);

    for (i, staff) in sheet.staves.iter().enumerate() {
        smf.tracks.push(staff_track(staff, u4::new(i as u8)));
    }

    smf
}

fn meta(message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(message),
    }
}

fn staff_track(staff: &StaffStream, channel: u4) -> Track<'static> {
    let mut track: Track<'static> = vec![TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(PIANO_PROGRAM),
            },
        },
    }];

    for note in staff.notes() {
        let key = u7::new(pitch_to_midi(note.pitch));
        let length = u32::from(note.duration.beats()) * u32::from(TICKS_PER_QUARTER);
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key,
                    vel: u7::new(VELOCITY),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(length),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key,
                    vel: u7::new(0),
                },
            },
        });
    }

    track.push(meta(MetaMessage::EndOfTrack));
    track
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::generator::{Bar, Note};
    use crate::rhythm::Duration;

    fn sheet() -> Sheet {
        let bar = |notes: &[(u8, Duration)]| Bar {
            notes: notes
                .iter()
                .map(|&(pitch, duration)| Note { pitch, duration })
                .collect(),
        };
        Sheet {
            layout: Layout::Grand,
            beats_per_bar: 4,
            staves: vec![
                StaffStream {
                    bars: vec![bar(&[(14, Duration::DottedHalf), (15, Duration::Quarter)])],
                    bars_per_line: 0,
                },
                StaffStream {
                    bars: vec![bar(&[(0, Duration::Whole)])],
                    bars_per_line: 0,
                },
            ],
        }
    }

    #[test]
    fn test_sheet_to_smf_tracks() {
        let smf = sheet_to_smf(&sheet(), 72);
        // 1 tempo track + 2 staff tracks
        assert_eq!(smf.tracks.len(), 3);
        // program change + 2 events per note + end of track
        assert_eq!(smf.tracks[1].len(), 1 + 4 + 1);
        assert_eq!(smf.tracks[2].len(), 1 + 2 + 1);
    }

    fn tempo_of(smf: &Smf) -> u32 {
        smf.tracks[0]
            .iter()
            .find_map(|e| match e.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_tempo_encoding() {
        assert_eq!(tempo_of(&sheet_to_smf(&sheet(), 72)), 833_333);
        assert_eq!(tempo_of(&sheet_to_smf(&sheet(), MIN_TEMPO_BPM)), 15_000_000);
    }

    #[test]
    fn test_slow_tempo_saturates_instead_of_wrapping() {
        for bpm in [0, 1, 3] {
            assert_eq!(
                tempo_of(&sheet_to_smf(&sheet(), bpm)),
                MAX_TEMPO_MICROSECONDS,
                "bpm {bpm}"
            );
        }
    }

    #[test]
    fn test_note_lengths_and_keys() {
        let smf = sheet_to_smf(&sheet(), 72);
        let offs: Vec<(u8, u32)> = smf.tracks[1]
            .iter()
            .filter_map(|e| match e.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOff { key, .. },
                    ..
                } => Some((key.as_int(), e.delta.as_int())),
                _ => None,
            })
            .collect();
        assert_eq!(offs, vec![(60, 3 * 480), (62, 480)]);
    }

    #[test]
    fn test_write_midi_roundtrip() {
        let path = std::env::temp_dir().join(format!("sightread_{}.mid", std::process::id()));
        write_midi(&sheet(), 90, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let parsed = Smf::parse(&bytes).unwrap();
        assert_eq!(parsed.tracks.len(), 3);
    }
}
