//! Scraped chord sheets with `[ch]..[/ch]` chord wrappers and
//! `[tab]..[/tab]` blocks.
//!
//! Block markers may sit anywhere on a line, so the source is first cut into
//! plain and block segments; a block wrapping `[ch]` markup is an ordinary
//! chord/lyric block, any other block is tablature.

use super::builder::{LineReader, SongBuilder};
use super::chords_over_words::{parse_body, ChordLineRule};
use crate::ast::{Section, Song};
use crate::section::SectionStateMachine;
use log::warn;

const TAB_START: &str = "[tab]";
const TAB_END: &str = "[/tab]";
const CHORD_START: &str = "[ch]";
const CHORD_END: &str = "[/ch]";

/// Chord lines are the ones carrying `[ch]` markup, whatever else they hold.
struct ChordMarkup;

impl ChordLineRule for ChordMarkup {
    fn chord_line(&self, line: &str) -> Option<String> {
        line.contains(CHORD_START)
            .then(|| line.replace(CHORD_START, "").replace(CHORD_END, ""))
    }

    fn blank_closes_tab(&self) -> bool {
        false
    }
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Plain(Vec<&'a str>),
    Block(Vec<&'a str>),
}

fn segments(source: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain = Vec::new();
    let mut block = Vec::new();
    let mut wait_end_of_tab = false;

    for line in source.lines() {
        let mut rest = line;
        loop {
            if wait_end_of_tab {
                let Some(index) = rest.find(TAB_END) else {
                    block.push(rest);
                    break;
                };
                if index > 0 {
                    block.push(&rest[..index]);
                }
                segments.push(Segment::Block(std::mem::take(&mut block)));
                wait_end_of_tab = false;
                rest = &rest[index + TAB_END.len()..];
                if rest.trim().is_empty() {
                    break;
                }
            } else {
                let Some(index) = rest.find(TAB_START) else {
                    plain.push(rest);
                    break;
                };
                let before = &rest[..index];
                if !before.trim().is_empty() {
                    plain.push(before);
                }
                if !plain.is_empty() {
                    segments.push(Segment::Plain(std::mem::take(&mut plain)));
                }
                wait_end_of_tab = true;
                rest = &rest[index + TAB_START.len()..];
                if rest.is_empty() {
                    break;
                }
            }
        }
    }

    if wait_end_of_tab {
        warn!("unterminated {} block, closing at end of input", TAB_START);
        segments.push(Segment::Block(block));
    }
    if !plain.is_empty() {
        segments.push(Segment::Plain(plain));
    }
    segments
}

pub(super) fn parse(source: &str) -> Song {
    let mut machine = SectionStateMachine::new();
    let mut out = SongBuilder::new();

    for segment in segments(source) {
        match segment {
            Segment::Block(lines) if !lines.iter().any(|l| l.contains(CHORD_START)) => {
                machine.open(Section::Tab, None, &mut out);
                for line in lines {
                    out.push_literal(line);
                }
                machine.close(&mut out);
            }
            Segment::Plain(lines) | Segment::Block(lines) => {
                let mut reader = LineReader::from_lines(lines);
                parse_body(&mut reader, &ChordMarkup, &mut machine, &mut out);
            }
        }
    }

    machine.finish(&mut out);
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ChordLyricsPair, Item};

    #[test]
    fn test_segments_split_mid_line() {
        let parts = segments("intro [tab]e|--0--|\nB|--1--|[/tab] outro");
        assert_eq!(
            parts,
            vec![
                Segment::Plain(vec!["intro "]),
                Segment::Block(vec!["e|--0--|", "B|--1--|"]),
                Segment::Plain(vec![" outro"]),
            ]
        );
    }

    #[test]
    fn test_marker_only_lines_leave_nothing_behind() {
        let parts = segments("[tab]\nG|--2--|\n[/tab]\nla");
        assert_eq!(
            parts,
            vec![Segment::Block(vec!["G|--2--|"]), Segment::Plain(vec!["la"])]
        );
    }

    #[test]
    fn test_unterminated_block_is_flushed() {
        assert_eq!(
            segments("[tab]D|--0--|"),
            vec![Segment::Block(vec!["D|--0--|"])]
        );
    }

    #[test]
    fn test_chord_markup_wins_over_annotations() {
        let song = parse("[ch]C[/ch]       [ch]G[/ch]  (x2)\nLet it be, let it be");
        let pairs: Vec<_> = song.lines[0].pairs().cloned().collect();
        assert_eq!(pairs[0].chords.as_deref(), Some("C"));
        assert_eq!(pairs[0].lyrics.as_deref(), Some("Let it b"));
        assert_eq!(pairs[1].chords.as_deref(), Some("G"));
        assert_eq!(pairs[2].chords.as_deref(), Some("(x2)"));
    }

    #[test]
    fn test_chord_block_is_not_tab() {
        let song = parse("[tab][ch]Am[/ch]\nHello[/tab]");
        assert_eq!(song.lines.len(), 1);
        assert_eq!(
            song.lines[0].items,
            vec![Item::Pair(ChordLyricsPair::new(Some("Am"), Some("Hello")))]
        );
    }

    #[test]
    fn test_tab_block_is_literal() {
        let source = "[tab]e|-----|\nhammer here\nE|--3--|[/tab]";
        let song = parse(source);
        let names: Vec<_> = song
            .lines
            .iter()
            .flat_map(|l| l.tags())
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names, vec!["start_of_tab", "end_of_tab"]);
        assert_eq!(song.lines[2].items, vec![Item::literal("hammer here")]);
    }

    #[test]
    fn test_headers_still_open_sections() {
        let song = parse("[Verse 1]\n[ch]D[/ch]\nsing");
        let first = song.lines[0].tags().next().unwrap();
        assert_eq!(first.name.to_string(), "start_of_verse");
        assert_eq!(first.value.as_deref(), Some("1"));
    }
}
