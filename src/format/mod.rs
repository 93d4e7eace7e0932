//! # Formatter Module
//!
//! Serializes a [`Song`] back to text. Each formatter is a fold over the
//! song's lines that matches every [`Item`](crate::ast::Item) variant.
//!
//! ## Formats
//! - [`Format::ChordPro`] - `[C]inline` chords and `{directive}` lines
//! - [`Format::Text`] - chords over words, with YAML front matter for metadata
//! - [`Format::Html`] - nested `<div>` rows and columns for a read-only view
//!
//! Tab sections are passed through verbatim, or dropped entirely when
//! [`FormatOptions::include_tabs`] is off. Formatting never transposes; see
//! [`crate::api::convert`] for the full pipeline.
//!
//! ## Example
//! ```rust
//! use chordsheet::format::{format, Format};
//! use chordsheet::{parse_song, Dialect, FormatOptions};
//!
//! let song = parse_song("[C]Let it [G]be", Dialect::ChordPro)?;
//! let text = format(&song, Format::Text, &FormatOptions::default());
//! assert_eq!(text, "C      G\nLet it be");
//! # Ok::<(), chordsheet::ChordSheetError>(())
//! ```

mod chordpro;
mod html;
mod text;

use crate::ast::{Line, Section, Song};
use crate::config::FormatOptions;
use crate::error::ChordSheetError;
use crate::parser::Dialect;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    ChordPro,
    Text,
    Html,
}

impl Format {
    /// The dialect that reads this format back.
    ///
    /// # Errors
    /// `UnsupportedDialect` for HTML, which is output only.
    pub fn dialect(self) -> Result<Dialect, ChordSheetError> {
        match self {
            Format::ChordPro => Ok(Dialect::ChordPro),
            Format::Text => Ok(Dialect::ChordsOverWords),
            Format::Html => Err(ChordSheetError::UnsupportedDialect(self.to_string())),
        }
    }
}

impl FromStr for Format {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chordpro" | "cho" | "pro" => Ok(Format::ChordPro),
            "text" | "txt" | "chords-over-words" => Ok(Format::Text),
            "html" | "htm" => Ok(Format::Html),
            other => Err(ChordSheetError::UnsupportedDialect(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::ChordPro => "chordpro",
            Format::Text => "text",
            Format::Html => "html",
        })
    }
}

/// Render `song` in the requested format.
pub fn format(song: &Song, format: Format, options: &FormatOptions) -> String {
    let lines = visible_lines(song, options);
    match format {
        Format::ChordPro => chordpro::format(&lines),
        Format::Text => text::format(song, &lines),
        Format::Html => html::format(song, &lines),
    }
}

/// Lines to render, tagged with their section, minus tab sections when those
/// are switched off.
fn visible_lines<'a>(song: &'a Song, options: &FormatOptions) -> Vec<(Section, &'a Line)> {
    song.sections()
        .into_iter()
        .filter(|(section, _)| options.include_tabs || *section != Section::Tab)
        .collect()
}
