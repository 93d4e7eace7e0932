//! # Error Types
//!
//! This module defines all error types for the chord sheet engine.
//!
//! ## Error Types
//! - `EmptyInput` - The sheet has no content at all
//! - `Encoding` - Raw bytes handed to [`crate::parse_bytes`] are not UTF-8
//! - `Frontmatter` - The YAML header of a chords-over-words sheet is invalid
//! - `UnsupportedDialect` - Unknown dialect/format name, or a parse requested for an output-only format
//! - `Structural` - A song violates section nesting or the tab invariant (see `semantic`)
//! - `Config` - A YAML options file could not be read
//!
//! Chord-level failures are not part of [`ChordSheetError`]:
//! [`ChordParseFailure`] is recovered at the chord boundary and the original
//! text passes through untouched.
//!
//! ## Usage
//! ```rust
//! use chordsheet::{parse_song, ChordSheetError, Dialect};
//!
//! match parse_song("", Dialect::ChordPro) {
//!     Ok(song) => println!("{} lines", song.lines.len()),
//!     Err(ChordSheetError::EmptyInput) => eprintln!("nothing to parse"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordSheetError {
    /// The input contained no non-whitespace characters.
    ///
    /// Distinct from a valid song that simply has no lines worth rendering.
    #[error("Empty input: nothing to parse")]
    EmptyInput,

    /// Invalid UTF-8 in a byte buffer.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::Encoding("invalid utf-8 sequence of 1 bytes from index 3".to_string());
    /// assert_eq!(err.to_string(), "Invalid encoding: invalid utf-8 sequence of 1 bytes from index 3");
    /// ```
    #[error("Invalid encoding: {0}")]
    Encoding(String),

    /// Invalid YAML front matter.
    #[error("Invalid front matter: {0}")]
    Frontmatter(String),

    /// The requested dialect or format cannot be used for this operation.
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// Structural error with the (1-based) song line it was detected on.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::Structural {
    ///     line: 4,
    ///     message: "end_of_chorus without matching start".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Structural error at line 4: end_of_chorus without matching start");
    /// ```
    #[error("Structural error at line {line}: {message}")]
    Structural { line: usize, message: String },

    #[error("Invalid options: {0}")]
    Config(String),
}

/// A single token did not match the chord grammar.
///
/// Carries the original text so callers can pass it through unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Not a chord: {input:?}")]
pub struct ChordParseFailure {
    pub input: String,
}

impl ChordParseFailure {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}
