//! Shared parser plumbing: the song under construction and a one-line
//! look-ahead reader over the source.

use crate::ast::{ChordLyricsPair, Item, Line, Song, Tag};

/// Accumulates lines in order. Every emitted line is final once pushed.
#[derive(Debug, Default)]
pub struct SongBuilder {
    song: Song,
}

impl SongBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: Line) {
        self.song.lines.push(line);
    }

    pub fn push_blank(&mut self) {
        self.push_line(Line::new());
    }

    pub fn push_tag(&mut self, tag: Tag) {
        self.push_line(Line::with_item(Item::Tag(tag)));
    }

    pub fn push_literal(&mut self, text: &str) {
        self.push_line(Line::with_item(Item::literal(text)));
    }

    pub fn push_comment(&mut self, text: &str) {
        self.push_line(Line::with_item(Item::comment(text)));
    }

    pub fn push_pairs(&mut self, pairs: Vec<ChordLyricsPair>) {
        self.push_line(Line {
            items: pairs.into_iter().map(Item::Pair).collect(),
        });
    }

    pub fn line_count(&self) -> usize {
        self.song.lines.len()
    }

    pub fn finish(self) -> Song {
        self.song
    }
}

/// Line cursor with a single line of look-ahead.
///
/// `next` always advances by exactly one line, so parser loops driven by it
/// terminate regardless of what the classifier regexes match.
pub struct LineReader<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::from_lines(source.lines().collect())
    }

    pub fn from_lines(lines: Vec<&'a str>) -> Self {
        Self { lines, position: 0 }
    }

    pub fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.position).copied();
        if line.is_some() {
            self.position += 1;
        }
        line
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    /// 1-based number of the line last returned by `next`.
    pub fn line_number(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_advances_one_line_at_a_time() {
        let mut reader = LineReader::new("a\nb\n\nc");
        assert_eq!(reader.peek(), Some("a"));
        assert_eq!(reader.next(), Some("a"));
        assert_eq!(reader.line_number(), 1);
        assert_eq!(reader.next(), Some("b"));
        assert_eq!(reader.next(), Some(""));
        assert_eq!(reader.peek(), Some("c"));
        assert_eq!(reader.next(), Some("c"));
        assert_eq!(reader.next(), None);
        assert_eq!(reader.line_number(), 4);
    }

    #[test]
    fn test_builder_keeps_order() {
        let mut builder = SongBuilder::new();
        builder.push_comment("first");
        builder.push_blank();
        builder.push_literal("e|---");
        let song = builder.finish();
        assert_eq!(song.lines.len(), 3);
        assert_eq!(song.lines[0].items, vec![Item::comment("first")]);
        assert!(song.lines[1].is_empty());
    }
}
