// LilyPond document output for generated sheets.
//
// Every document shares one frame: the version line, an A4 landscape paper
// with a large staff size, and a `\score` whose `\layout` block sets the
// shortest spacing unit to a sixteenth so dense quarter-note bars stay
// readable. Inside the score the layout picks the staff group:
//
//   Grand     \new PianoStaff << treble (with \time) , bass clef >>
//   2Treble   << treble (with \time) , treble >>
//   Beats     << treble (with \time) >>
//
// Each staff's music is the flat token stream from `StaffStream::render`,
// notes in absolute pitch with `\break` markers already placed.

use crate::config::Layout;
use crate::error::SheetError;
use crate::generator::Sheet;
use std::fmt::Write;
use std::path::Path;

pub const LY_VERSION: &str = "2.16.2";

const HEADER: &str = "#(set-default-paper-size \"a4\" 'landscape)\n\
#(set-global-staff-size 30)\n\
\\score\n";

const LAYOUT_BLOCK: &str = concat!(
    "  \\layout {\n",
    "    \\context {\n",
    "      \\Score\n",
    "      \\override SpacingSpanner #'base-shortest-duration = #(ly:make-moment 1 16)\n",
    "    }\n",
    "  }\n",
);

/// The opening commands of each staff of a layout, top to bottom. The time
/// signature goes on the first staff only.
pub fn staff_openers(layout: Layout, beats_per_bar: u8) -> Vec<String> {
    let time = format!("\\time {}/4", beats_per_bar);
    match layout {
        Layout::Grand => vec![time, "\\clef \"bass\"".to_string()],
        Layout::TwoTreble => vec![
            format!("\\clef \"treble\" {}", time),
            "\\clef \"treble\"".to_string(),
        ],
        Layout::Beats => vec![format!("\\clef \"treble\" {}", time)],
    }
}

/// Render a complete `.ly` document for a sheet.
pub fn render_document(sheet: &Sheet) -> String {
    let mut ly = String::new();
    let _ = write!(ly, "\\version \"{}\"\n\n", LY_VERSION);
    ly.push_str(HEADER);
    ly.push_str("{\n");

    if sheet.layout == Layout::Grand {
        ly.push_str("  \\new PianoStaff\n");
    }
    ly.push_str("  <<\n");
    for (opener, staff) in staff_openers(sheet.layout, sheet.beats_per_bar)
        .iter()
        .zip(&sheet.staves)
    {
        let _ = write!(
            ly,
            "    \\new Staff {{ {opener}\n      {music}\n    }}\n",
            music = staff.render()
        );
    }
    ly.push_str("  >>\n");

    ly.push_str(LAYOUT_BLOCK);
    ly.push_str("}\n");
    ly
}

/// Write a sheet's LilyPond document to a file.
pub fn write_lilypond(sheet: &Sheet, path: &Path) -> Result<(), SheetError> {
    std::fs::write(path, render_document(sheet))?;
    Ok(())
}
