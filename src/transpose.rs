//! Song-wide chord transposition.
//!
//! Every chord in a `ChordLyricsPair` is parsed and re-rendered with the
//! requested semitone delta. A delta of 0 still runs the full cycle and acts
//! as a spelling repair pass (`CM7` → `CMaj7`). Text that is not a chord is
//! kept as written.

use crate::ast::{Item, Song};
use crate::chord::{self, RenderOptions};
use log::warn;

/// Transpose one chord symbol, handing the input back unchanged when it
/// does not parse.
pub fn transpose_chord(symbol: &str, delta: i32, options: RenderOptions) -> String {
    match chord::transpose_symbol(symbol, delta, options) {
        Ok(rendered) => rendered,
        Err(failure) => {
            warn!("{}, keeping it as written", failure);
            symbol.to_string()
        }
    }
}

/// Rewrite every chord of `song` in place and hand the song back.
pub fn transpose(mut song: Song, delta: i32, options: RenderOptions) -> Song {
    for line in &mut song.lines {
        for item in &mut line.items {
            if let Item::Pair(pair) = item {
                if let Some(chords) = pair.chords.as_mut() {
                    *chords = transpose_chord(chords, delta, options);
                }
            }
        }
    }
    song
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ChordLyricsPair, Line};

    fn song_with(chords: &[&str]) -> Song {
        Song {
            lines: vec![Line {
                items: chords
                    .iter()
                    .map(|c| Item::pair(Some(c), Some("la ")))
                    .chain(std::iter::once(Item::literal("e|--3--|")))
                    .collect(),
            }],
        }
    }

    fn chords_of(song: &Song) -> Vec<&str> {
        song.chord_texts().collect()
    }

    #[test]
    fn test_transpose_up_a_tone() {
        let song = transpose(song_with(&["C", "Am7", "F/A", "Bb"]), 2, RenderOptions::default());
        assert_eq!(chords_of(&song), vec!["D", "Bm7", "G/B", "C"]);
    }

    #[test]
    fn test_zero_delta_repairs_spelling() {
        let song = transpose(song_with(&["CM7", "H7", "E#"]), 0, RenderOptions::default());
        assert_eq!(chords_of(&song), vec!["CMaj7", "B7", "F"]);
    }

    #[test]
    fn test_flats_stay_flats() {
        let song = transpose(song_with(&["Eb", "Bbm"]), 1, RenderOptions::default());
        assert_eq!(chords_of(&song), vec!["E", "Bm"]);
        let song = transpose(song_with(&["Eb", "Ab"]), 2, RenderOptions::default());
        assert_eq!(chords_of(&song), vec!["F", "Bb"]);
    }

    #[test]
    fn test_unparseable_chord_is_kept() {
        let song = transpose(song_with(&["XYZ123", "G"]), 5, RenderOptions::default());
        assert_eq!(chords_of(&song), vec!["XYZ123", "C"]);
    }

    #[test]
    fn test_lyrics_and_literals_untouched() {
        let song = transpose(song_with(&["C"]), 7, RenderOptions::default());
        assert_eq!(
            song.lines[0].items,
            vec![
                Item::Pair(ChordLyricsPair::new(Some("G"), Some("la "))),
                Item::literal("e|--3--|"),
            ]
        );
    }

    #[test]
    fn test_simplify_option() {
        let options = RenderOptions { simplify: true };
        assert_eq!(transpose_chord("Cadd9", 0, options), "C2");
        assert_eq!(transpose_chord("Cadd9", 0, RenderOptions::default()), "Cadd9");
    }
}
