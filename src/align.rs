//! # Column Aligner
//!
//! Merges a chord line and the lyric line below it into chord/lyric pairs by
//! column, and renders pairs back into a space-padded two-line form.
//!
//! ## Alignment
//! ```text
//!   Ab              chord line
//! I hold my head    lyric line
//!
//! → [ (None, "I "), ("Ab", "hold my head") ]
//! ```
//! A pair starts at every chord token. Lyric characters under the token and
//! up to the next token belong to it, even mid-word. Lyrics left of the
//! first token form a chord-less leading pair. Columns past the end of the
//! lyric line contribute nothing (`None`), never padding; such a pair keeps
//! the distance to the next chord as its `width` instead.
//!
//! ## Rendering
//! Each pair is padded to `max(len(chords) + 1, len(lyrics), width)` columns,
//! so a chord is always followed by at least one space. Whitespace run lengths are
//! not preserved exactly; `align(render(align(..)))` yields the same pairs.

use crate::ast::ChordLyricsPair;

/// Lyric characters in `[start, end)`, or `None` when the range lies beyond
/// the lyric line.
fn slice(chars: &[char], start: usize, end: usize) -> Option<String> {
    if start >= chars.len() {
        return None;
    }
    let end = end.min(chars.len());
    Some(chars[start..end].iter().collect())
}

pub fn align(chord_line: &str, lyric_line: &str) -> Vec<ChordLyricsPair> {
    let chords: Vec<char> = chord_line.chars().collect();
    let lyrics: Vec<char> = lyric_line.chars().collect();
    let width = chords.len().max(lyrics.len());

    // (start column, token end column) for every chord token
    let mut tokens = Vec::new();
    let mut column = 0;
    while column < chords.len() {
        if chords[column].is_whitespace() {
            column += 1;
            continue;
        }
        let start = column;
        while column < chords.len() && !chords[column].is_whitespace() {
            column += 1;
        }
        tokens.push((start, column));
    }

    let mut pairs = Vec::new();
    let first = tokens.first().map_or(width, |&(start, _)| start);
    if let Some(leading) = slice(&lyrics, 0, first).filter(|l| !l.is_empty()) {
        pairs.push(ChordLyricsPair::new(None, Some(&leading)));
    }
    for (i, &(start, end)) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map_or(width, |&(next_start, _)| next_start);
        let chord: String = chords[start..end].iter().collect();
        let pair = match slice(&lyrics, start, next) {
            Some(lyric) => ChordLyricsPair::new(Some(&chord), Some(&lyric)),
            None => ChordLyricsPair::new(Some(&chord), None).with_width(next - start),
        };
        pairs.push(pair);
    }
    pairs
}

/// Render pairs as `(chord_line, lyric_line)`, both without trailing spaces.
pub fn render(pairs: &[ChordLyricsPair]) -> (String, String) {
    let mut chord_line = String::new();
    let mut lyric_line = String::new();
    for pair in pairs {
        let chords = pair.chords.as_deref().unwrap_or("");
        let lyrics = pair.lyrics.as_deref().unwrap_or("");
        let chord_width = chords.chars().count();
        let lyric_width = lyrics.chars().count();
        let width = if chord_width > 0 {
            (chord_width + 1).max(lyric_width).max(pair.width.unwrap_or(0))
        } else {
            lyric_width
        };
        chord_line.push_str(chords);
        chord_line.extend(std::iter::repeat(' ').take(width - chord_width));
        lyric_line.push_str(lyrics);
        lyric_line.extend(std::iter::repeat(' ').take(width - lyric_width));
    }
    (
        chord_line.trim_end().to_string(),
        lyric_line.trim_end().to_string(),
    )
}
