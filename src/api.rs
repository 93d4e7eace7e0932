//! # Public API
//!
//! This module contains the main entry points for the chord sheet engine.
//!
//! ## Pipeline Functions
//!
//! - [`parse_song()`] - Parse a sheet in one of the three input dialects
//! - [`parse_bytes()`] - Same, from raw bytes that must be UTF-8
//! - [`format_song()`] - Serialize an already parsed song
//! - [`convert()`] - Parse, transpose and format in one call
//! - [`distinct_chords()`] - Chord list for chart lookups
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordsheet::{convert, Dialect, Format, FormatOptions};
//!
//! let source = "{title: Let It Be}\n[C]Let it [G]be";
//! let options = FormatOptions { transpose: 2, ..FormatOptions::default() };
//!
//! let text = convert(source, Dialect::ChordPro, Format::Text, &options)?;
//! assert_eq!(text, "---\ntitle: Let It Be\n---\nD      A\nLet it be");
//! # Ok::<(), chordsheet::ChordSheetError>(())
//! ```

use crate::ast::Song;
use crate::chord::{Chord, RenderOptions};
use crate::config::FormatOptions;
use crate::error::ChordSheetError;
use crate::format::{self, Format};
use crate::parser::{self, Dialect};
use crate::transpose::transpose;
use log::warn;

/// Parse a chord sheet.
///
/// # Example
/// ```rust
/// use chordsheet::{parse_song, Dialect};
///
/// let song = parse_song("C     G\nHello world", Dialect::ChordsOverWords)?;
/// assert_eq!(song.chord_texts().collect::<Vec<_>>(), vec!["C", "G"]);
/// # Ok::<(), chordsheet::ChordSheetError>(())
/// ```
///
/// # Errors
/// `EmptyInput` for blank input, `Frontmatter` for an invalid YAML header.
pub fn parse_song(source: &str, dialect: Dialect) -> Result<Song, ChordSheetError> {
    parser::parse(source, dialect)
}

/// Parse a chord sheet from bytes.
///
/// # Errors
/// `Encoding` when the bytes are not valid UTF-8, otherwise as [`parse_song`].
pub fn parse_bytes(bytes: &[u8], dialect: Dialect) -> Result<Song, ChordSheetError> {
    let source =
        std::str::from_utf8(bytes).map_err(|e| ChordSheetError::Encoding(e.to_string()))?;
    parse_song(source, dialect)
}

/// Serialize `song`. Chords are written as they are; transpose first to
/// change them.
pub fn format_song(song: &Song, format: Format, options: &FormatOptions) -> String {
    format::format(song, format, options)
}

/// Parse, transpose by `options.transpose` and format.
///
/// The transposition always runs, so a delta of 0 normalizes every chord
/// spelling on the way through.
///
/// # Errors
/// Any parse error of [`parse_song`].
pub fn convert(
    source: &str,
    from: Dialect,
    to: Format,
    options: &FormatOptions,
) -> Result<String, ChordSheetError> {
    let song = parse_song(source, from)?;
    let song = transpose(song, options.transpose, options.render_options());
    Ok(format_song(&song, to, options))
}

/// Distinct chords in order of first appearance, compared by their canonical
/// spelling. Text that is not a chord is skipped.
pub fn distinct_chords(song: &Song) -> Vec<String> {
    let mut chords: Vec<String> = Vec::new();
    for text in song.chord_texts() {
        match Chord::parse(text) {
            Ok(chord) => {
                let rendered = chord.render(0, RenderOptions::default());
                if !chords.contains(&rendered) {
                    chords.push(rendered);
                }
            }
            Err(failure) => warn!("{}, leaving it out of the chord list", failure),
        }
    }
    chords
}
