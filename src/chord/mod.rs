//! # Chord Symbol Resolver
//!
//! Parses a bare chord token (`Cm7b5/Gb`) into root, bass, intervals,
//! semitones and spelled notes, and renders it back to a canonical symbol,
//! optionally transposed.
//!
//! ## Grammar
//! ```text
//! chord      = root descriptor [ "/" bass ]
//! root, bass = letter [ accidental ]          letter: A-G, or H (read as B)
//! accidental = "b" | "#" | "bb" | "##" | "♭" | "♯"
//! descriptor = see `descriptor` (m, dim, aug, Maj, 6, 7..13, sus, add, b/# alterations)
//! ```
//!
//! ## Normalization
//! - Letter-name overflows come out of the chromatic table: `Fb` → `E`, `Cb` → `B`, `B#` → `C`, `E#` → `F`
//! - `H` is rendered as `B`
//! - `M`/`maj` → `Maj`, `mM` → `mMaj`, `°` → `dim`
//! - `C7(b9,#9)` and `C7b9#9` render identically
//! - `7/9` collapses to `9`
//! - Alterations directly after the root are parenthesized: `C-5` → `C(b5)`
//! - legacy `-`/`+` alterations are accepted but never emitted
//!
//! ## Accidental preference
//! Transposed roots use sharps unless the input root (or, for a natural
//! root, the bass) was spelled with a flat.
//!
//! ## Example
//! ```rust
//! use chordsheet::chord::{Chord, RenderOptions};
//!
//! let chord = Chord::parse("Cmaj7").unwrap();
//! assert_eq!(chord.intervals, vec!["1", "3", "5", "7"]);
//! assert_eq!(chord.semitones, vec![0, 4, 7, 11]);
//! assert_eq!(chord.render(2, RenderOptions::default()), "DMaj7");
//! ```

mod descriptor;
mod note;


pub use descriptor::{Alteration, Descriptor, Quality};
pub use note::{Accidental, Letter, Note};

use crate::error::ChordParseFailure;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static CHORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-H])(##|bb|#|b|♯|♭)?(.*?)(?:/([A-H])(##|bb|#|b|♯|♭)?)?$")
        .expect("chord grammar is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Write a plain major triad with an added 9th as `2` (`Badd9` → `B2`).
    pub simplify: bool,
}

/// A successfully parsed chord symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chord {
    pub input: String,
    pub root: Note,
    pub bass: Option<Note>,
    pub descriptor: Descriptor,
    pub intervals: Vec<String>,
    pub semitones: Vec<i32>,
    pub notes: Vec<String>,
}

impl Chord {
    pub fn parse(token: &str) -> Result<Self, ChordParseFailure> {
        let fail = || ChordParseFailure::new(token);
        let caps = CHORD_RE.captures(token.trim()).ok_or_else(fail)?;

        let accidental = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let root = Note::from_parts(&caps[1], accidental(2)).ok_or_else(fail)?;
        let bass = match caps.get(4) {
            Some(letter) => Some(Note::from_parts(letter.as_str(), accidental(5)).ok_or_else(fail)?),
            None => None,
        };
        let descriptor = Descriptor::parse(caps.get(3).map_or("", |m| m.as_str())).ok_or_else(fail)?;

        let tones = descriptor.intervals();
        Ok(Self {
            input: token.to_string(),
            root,
            bass,
            intervals: tones.iter().map(|t| t.name.clone()).collect(),
            semitones: tones.iter().map(|t| t.semitones).collect(),
            notes: tones
                .iter()
                .map(|t| root.interval(t.degree, t.semitones).to_string())
                .collect(),
            descriptor,
        })
    }

    /// Whether transposed notes should be spelled with flats.
    pub fn prefers_flats(&self) -> bool {
        match self.root.accidental {
            Accidental::Natural => self.bass.is_some_and(|b| b.accidental.is_flat()),
            accidental => accidental.is_flat(),
        }
    }

    /// Render the canonical symbol, `transpose` semitones away from the input.
    ///
    /// A transpose of 0 still normalizes the spelling.
    pub fn render(&self, transpose: i32, options: RenderOptions) -> String {
        let transpose = transpose.rem_euclid(12);
        let flats = self.prefers_flats();
        let mut out = Note::from_pitch_class(self.root.pitch_class() + transpose, flats).to_string();
        out.push_str(&self.descriptor.render(options.simplify));
        if let Some(bass) = self.bass {
            out.push('/');
            out.push_str(&Note::from_pitch_class(bass.pitch_class() + transpose, flats).to_string());
        }
        out
    }

    /// Pitch class of the root after transposing, for comparisons that
    /// ignore enharmonic spelling.
    pub fn root_pitch_class(&self, transpose: i32) -> i32 {
        (self.root.pitch_class() + transpose.rem_euclid(12)).rem_euclid(12)
    }
}

/// True when `token` is a chord symbol. Used to classify chord lines.
pub fn is_chord(token: &str) -> bool {
    Chord::parse(token).is_ok()
}

/// Parse and re-render `token`, or hand back the failure.
pub fn transpose_symbol(token: &str, transpose: i32, options: RenderOptions) -> Result<String, ChordParseFailure> {
    Chord::parse(token).map(|chord| chord.render(transpose, options))
}
