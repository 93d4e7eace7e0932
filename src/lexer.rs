//! # Line Classifier
//!
//! Regex predicates that decide what a raw text line is before any parser
//! acts on it.
//!
//! ## Classes
//! - **Tab line** - standard 6-string notation: `e|---3---`, `B-2-3-`, `|G|--0--`
//! - **Chord line** - every whitespace-separated token is a chord symbol
//! - **Header line** - `[Bracketed Text]`, `Word:` or `(parenthetical words)`, tried in that order
//! - **Lyrics** - anything else
//!
//! A header is resolved to a section keyword (`Verse 2` → verse, qualifier
//! `2`) or falls back to a generic comment.

use crate::ast::Section;
use crate::chord;
use once_cell::sync::Lazy;
use regex::Regex;

static TAB_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\|?([eBGDAE])\s?[|:]?([-0-9hpbrxv/\\~|*().\s]*)$")
        .expect("tab line pattern is a valid regex")
});
static BRACKET_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[([^\[\]]+)\]\s*$").expect("bracket header pattern is a valid regex"));
static COLON_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9 .'-]*?)\s*:\s*$").expect("colon header pattern is a valid regex")
});
static PAREN_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\(([^()]+)\)\s*$").expect("paren header pattern is a valid regex"));
static SECTION_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(verse|strophe|couplet|chorus|refrain)(\s*\d.*|\s+.*|\s*)$")
        .expect("section keyword pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    Bracket,
    Colon,
    Paren,
}

/// A recognised header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub style: HeaderStyle,
    /// The header text without its brackets/colon/parentheses.
    pub text: String,
    /// `Verse`/`Chorus` when the text starts with a section keyword.
    pub section: Option<Section>,
    /// Trailing qualifier after the keyword (`2` in `Verse 2`).
    pub qualifier: Option<String>,
}

impl Header {
    fn new(style: HeaderStyle, text: &str) -> Self {
        let text = text.trim();
        let (section, qualifier) = match SECTION_KEYWORD_RE.captures(text) {
            Some(caps) => {
                let keyword = caps[1].to_ascii_lowercase();
                let section = match keyword.as_str() {
                    "chorus" | "refrain" => Section::Chorus,
                    _ => Section::Verse,
                };
                let qualifier = caps[2].trim();
                (Some(section), (!qualifier.is_empty()).then(|| qualifier.to_string()))
            }
            None => (None, None),
        };
        Self {
            style,
            text: text.to_string(),
            section,
            qualifier,
        }
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClass {
    pub is_tab_line: bool,
    pub is_chord_line: bool,
    pub is_header_line: bool,
    pub header: Option<Header>,
}

impl LineClass {
    pub fn header_style(&self) -> Option<HeaderStyle> {
        self.header.as_ref().map(|h| h.style)
    }
}

pub fn classify(line: &str) -> LineClass {
    let header = header(line);
    LineClass {
        is_tab_line: is_tab_line(line),
        is_chord_line: is_chord_line(line),
        is_header_line: header.is_some(),
        header,
    }
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub fn is_tab_line(line: &str) -> bool {
    tab_string(line).is_some()
}

/// The string name a tab line starts with (`e`, `B`, ...).
///
/// The rest of the line must be fret notation to the end: at least two
/// dashes, and technique letters (`h`, `p`, `b`, ...) only one at a time.
pub fn tab_string(line: &str) -> Option<char> {
    let caps = TAB_LINE_RE.captures(line)?;
    let body = caps[2].as_bytes();
    let dashes = body.iter().filter(|&&b| b == b'-').count();
    let letter_run = body
        .windows(2)
        .any(|w| w[0].is_ascii_alphabetic() && w[1].is_ascii_alphabetic());
    if dashes < 2 || letter_run {
        return None;
    }
    caps[1].chars().next()
}

/// Tab lines for the outer (`e`/`E`) strings bound a tab diagram.
pub fn is_tab_boundary(line: &str) -> bool {
    matches!(tab_string(line), Some('e' | 'E'))
}

/// True when the line has at least one token and every token is a chord.
pub fn is_chord_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(chord::is_chord)
}

/// Try bracket, colon and parenthesis headers in that order.
pub fn header(line: &str) -> Option<Header> {
    if let Some(caps) = BRACKET_HEADER_RE.captures(line) {
        return Some(Header::new(HeaderStyle::Bracket, &caps[1]));
    }
    if let Some(caps) = COLON_HEADER_RE.captures(line) {
        return Some(Header::new(HeaderStyle::Colon, &caps[1]));
    }
    PAREN_HEADER_RE
        .captures(line)
        .map(|caps| Header::new(HeaderStyle::Paren, &caps[1]))
}

/// `#`-style comment lines.
pub fn comment(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix('#').map(str::trim)
}
