//! # Parser Module
//!
//! Turns chord sheet text into a [`Song`]. Three dialects share the line
//! classifier, the section state machine and the column aligner, and differ
//! only in which predicate decides that a line carries chords.
//!
//! ## Dialects
//!
//! ### ChordPro
//! Chords inline in brackets, directives in braces:
//! ```text
//! {title: Let It Be}
//! {start_of_chorus}
//! [C]Let it be, let it [G]be
//! {end_of_chorus}
//! ```
//!
//! ### Chords over words
//! A chord line directly above its lyric line, aligned by column, with
//! optional YAML front matter and bracket/colon/parenthesis headers:
//! ```text
//! ---
//! title: Let It Be
//! ---
//! [Chorus]
//! C                 G
//! Let it be, let it be
//! ```
//!
//! ### Raw (scraped markup)
//! Chords wrapped in `[ch]..[/ch]`, blocks wrapped in `[tab]..[/tab]`. The
//! markup, not the all-tokens-are-chords heuristic, marks chord lines.
//!
//! ## Entry Point
//! `parse(source: &str, dialect: Dialect) -> Result<Song, ChordSheetError>`
//!
//! ## Example
//! ```rust
//! use chordsheet::parser::{parse, Dialect};
//!
//! let song = parse("[C]Let it [G]be", Dialect::ChordPro).unwrap();
//! assert_eq!(song.lines.len(), 1);
//! assert_eq!(song.lines[0].items.len(), 2);
//! ```
//!
//! ## Related Modules
//! - `lexer` - Line classification
//! - `section` - Section start/end bookkeeping
//! - `align` - Two-line chord/lyric merging

pub mod builder;
mod chordpro;
mod chords_over_words;
mod raw;

use crate::ast::Song;
use crate::error::ChordSheetError;
use crate::semantic;
use std::fmt;
use std::str::FromStr;

pub use chords_over_words::parse_front_matter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    ChordPro,
    ChordsOverWords,
    Raw,
}

impl FromStr for Dialect {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chordpro" | "cho" | "pro" => Ok(Dialect::ChordPro),
            "text" | "txt" | "chords-over-words" => Ok(Dialect::ChordsOverWords),
            "raw" | "ultimate-guitar" | "ug" => Ok(Dialect::Raw),
            other => Err(ChordSheetError::UnsupportedDialect(other.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::ChordPro => "chordpro",
            Dialect::ChordsOverWords => "chords-over-words",
            Dialect::Raw => "raw",
        })
    }
}

/// Parse `source` in the given dialect.
///
/// # Errors
/// `EmptyInput` for empty or whitespace-only input, `Frontmatter` for an
/// invalid YAML header. Chords that fail to parse are never errors.
pub fn parse(source: &str, dialect: Dialect) -> Result<Song, ChordSheetError> {
    if source.trim().is_empty() {
        return Err(ChordSheetError::EmptyInput);
    }

    let song = match dialect {
        Dialect::ChordPro => chordpro::parse(source),
        Dialect::ChordsOverWords => chords_over_words::parse(source)?,
        Dialect::Raw => raw::parse(source),
    };

    debug_assert!(
        semantic::validate(&song).is_ok(),
        "parser produced malformed sections: {:?}",
        semantic::validate(&song)
    );
    Ok(song)
}
