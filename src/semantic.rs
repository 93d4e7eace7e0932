//! # Structural Validation Module
//!
//! Checks that a song's section tags are properly nested and that tab
//! sections only carry verbatim text.
//!
//! ## Purpose
//! Every parser routes section changes through the section state machine, so
//! a parsed song always passes. This module exists for songs built or edited
//! by hand, and as the invariant the parsers `debug_assert!`.
//!
//! ## Validation Rules
//!
//! ### Nesting
//! - A `start_of_*` tag may only appear when no section is open
//! - An `end_of_*` tag must close the section that is currently open
//! - Every section opened must be closed before the end of the song
//!
//! ### Tab content
//! - Between `start_of_tab` and `end_of_tab` every item is a `Literal`
//!
//! ## Entry Point
//! `validate(song: &Song) -> Result<(), ChordSheetError>`
//!
//! ## Example
//! ```rust
//! use chordsheet::{parse_song, semantic::validate, Dialect};
//!
//! let song = parse_song("{soc}\n[C]Hey\n{eoc}", Dialect::ChordPro)?;
//! validate(&song)?;
//! # Ok::<(), chordsheet::ChordSheetError>(())
//! ```
//!
//! ## Related Modules
//! - `section` - Produces well-nested tags during parsing
//! - `error` - `ChordSheetError::Structural` carries 1-based line numbers

use crate::ast::{Item, Section, Song};
use crate::error::ChordSheetError;

/// Validate section nesting and tab content.
pub fn validate(song: &Song) -> Result<(), ChordSheetError> {
    let mut open = Section::None;

    for (i, line) in song.lines.iter().enumerate() {
        let line_number = i + 1;

        for item in &line.items {
            let boundary = match item {
                Item::Tag(tag) => tag.section_boundary(),
                _ => None,
            };

            match boundary {
                Some((section, true)) => {
                    if open != Section::None {
                        return Err(structural(
                            line_number,
                            format!(
                                "{} section opened while {} section is still open",
                                section.label(),
                                open.label()
                            ),
                        ));
                    }
                    open = section;
                }
                Some((section, false)) => {
                    if open != section {
                        return Err(structural(
                            line_number,
                            format!("end of {} section without a matching start", section.label()),
                        ));
                    }
                    open = Section::None;
                }
                None if open == Section::Tab && !matches!(item, Item::Literal { .. }) => {
                    return Err(structural(
                        line_number,
                        "tab sections may only contain literal text".to_string(),
                    ));
                }
                None => {}
            }
        }
    }

    if open != Section::None {
        return Err(structural(
            song.lines.len(),
            format!("{} section is never closed", open.label()),
        ));
    }
    Ok(())
}

fn structural(line: usize, message: String) -> ChordSheetError {
    ChordSheetError::Structural { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Line, Tag, TagName};

    fn tag_line(name: TagName) -> Line {
        Line::with_item(Item::Tag(Tag::new(name, None)))
    }

    #[test]
    fn test_well_nested_song_passes() {
        let song = Song {
            lines: vec![
                tag_line(TagName::StartOfVerse),
                Line::with_item(Item::pair(Some("C"), Some("la"))),
                tag_line(TagName::EndOfVerse),
                tag_line(TagName::StartOfTab),
                Line::with_item(Item::literal("e|--0--|")),
                tag_line(TagName::EndOfTab),
            ],
        };
        assert_eq!(validate(&song), Ok(()));
    }

    #[test]
    fn test_nested_start_is_rejected() {
        let song = Song {
            lines: vec![tag_line(TagName::StartOfVerse), tag_line(TagName::StartOfChorus)],
        };
        assert!(matches!(
            validate(&song),
            Err(ChordSheetError::Structural { line: 2, .. })
        ));
    }

    #[test]
    fn test_mismatched_end_is_rejected() {
        let song = Song {
            lines: vec![tag_line(TagName::StartOfVerse), tag_line(TagName::EndOfChorus)],
        };
        assert!(matches!(
            validate(&song),
            Err(ChordSheetError::Structural { line: 2, .. })
        ));
    }

    #[test]
    fn test_unclosed_section_is_rejected() {
        let song = Song {
            lines: vec![tag_line(TagName::StartOfChorus), Line::new()],
        };
        assert!(matches!(
            validate(&song),
            Err(ChordSheetError::Structural { line: 2, .. })
        ));
    }

    #[test]
    fn test_pair_inside_tab_is_rejected() {
        let song = Song {
            lines: vec![
                tag_line(TagName::StartOfTab),
                Line::with_item(Item::pair(Some("C"), None)),
                tag_line(TagName::EndOfTab),
            ],
        };
        assert!(matches!(
            validate(&song),
            Err(ChordSheetError::Structural { line: 2, .. })
        ));
    }
}
