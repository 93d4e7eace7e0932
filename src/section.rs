//! # Section State Machine
//!
//! Tracks which section (`None`, `Verse`, `Chorus`, `Tab`) the parser is in
//! and emits start/end tags so the resulting song is always properly nested.
//!
//! ## Transitions
//! - Verse/chorus header → close the open section, open the new one with the
//!   header's qualifier as the start tag value
//! - Other header → close an open verse/chorus, emit a `comment` tag
//! - First tab line outside a tab section → close the open section, open
//!   `Tab`, keep the line as a literal
//! - Inside `Tab` every line is a literal; an outer-string (`e`/`E`) tab
//!   line is the closing boundary
//! - Explicit directives (ChordPro) open/close directly
//! - End of input → close whatever is open
//!
//! Malformed nesting never errors: opening a section while another is open
//! closes the previous one first, and a stray end directive closes whatever
//! is open (or is dropped when nothing is).

use crate::ast::{Section, Tag, TagName};
use crate::lexer::{self, Header};
use crate::parser::builder::SongBuilder;
use log::{debug, warn};

#[derive(Debug, Default)]
pub struct SectionStateMachine {
    state: Section,
}

impl SectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Section {
        self.state
    }

    pub fn in_tab(&self) -> bool {
        self.state == Section::Tab
    }

    /// Open `section`, implicitly closing the current one.
    pub fn open(&mut self, section: Section, value: Option<&str>, out: &mut SongBuilder) {
        if self.state != Section::None {
            debug!("implicitly closing {:?} before opening {:?}", self.state, section);
        }
        self.close(out);
        if let Some(tag) = Tag::start(section, value) {
            out.push_tag(tag);
            self.state = section;
        }
    }

    /// Emit the end tag of the open section, if any.
    pub fn close(&mut self, out: &mut SongBuilder) {
        if let Some(tag) = Tag::end(self.state) {
            out.push_tag(tag);
        }
        self.state = Section::None;
    }

    /// Handle an explicit end directive for `section`.
    pub fn end(&mut self, section: Section, out: &mut SongBuilder) {
        match self.state {
            Section::None => warn!("ignoring end of {:?} with no open section", section),
            open if open != section => {
                debug!("end of {:?} closes mismatched {:?}", section, open);
                self.close(out);
            }
            _ => self.close(out),
        }
    }

    /// Apply a classified header line.
    pub fn header(&mut self, header: &Header, out: &mut SongBuilder) {
        match header.section {
            Some(section) => self.open(section, header.qualifier.as_deref(), out),
            None => {
                self.close(out);
                out.push_tag(Tag::new(TagName::Comment, Some(&header.text)));
            }
        }
    }

    /// Route a line through tab-section inference.
    ///
    /// Returns `true` when the line was consumed as tab content.
    pub fn tab_line(&mut self, line: &str, out: &mut SongBuilder) -> bool {
        if self.in_tab() {
            out.push_literal(line);
            if lexer::is_tab_boundary(line) {
                self.close(out);
            }
            return true;
        }
        if lexer::is_tab_line(line) {
            self.open(Section::Tab, None, out);
            out.push_literal(line);
            return true;
        }
        false
    }

    /// Force the machine back to `None` at end of input.
    pub fn finish(&mut self, out: &mut SongBuilder) {
        self.close(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Item, Song};

    fn tag_names(song: &Song) -> Vec<String> {
        song.lines
            .iter()
            .flat_map(|l| l.tags())
            .map(|t| t.name.to_string())
            .collect()
    }

    #[test]
    fn test_open_closes_previous_section() {
        let mut out = SongBuilder::new();
        let mut machine = SectionStateMachine::new();
        machine.open(Section::Verse, Some("1"), &mut out);
        machine.open(Section::Chorus, None, &mut out);
        machine.finish(&mut out);
        let song = out.finish();
        assert_eq!(
            tag_names(&song),
            vec!["start_of_verse", "end_of_verse", "start_of_chorus", "end_of_chorus"]
        );
        assert_eq!(machine.state(), Section::None);
    }

    #[test]
    fn test_stray_end_is_dropped() {
        let mut out = SongBuilder::new();
        let mut machine = SectionStateMachine::new();
        machine.end(Section::Chorus, &mut out);
        assert_eq!(out.line_count(), 0);
    }

    #[test]
    fn test_mismatched_end_closes_open_section() {
        let mut out = SongBuilder::new();
        let mut machine = SectionStateMachine::new();
        machine.open(Section::Verse, None, &mut out);
        machine.end(Section::Chorus, &mut out);
        assert_eq!(tag_names(&out.finish()), vec!["start_of_verse", "end_of_verse"]);
    }

    #[test]
    fn test_tab_block_closes_on_outer_string() {
        let mut out = SongBuilder::new();
        let mut machine = SectionStateMachine::new();
        for line in ["e|---0---", "B|---1---", "G|---0---", "D|---2---", "A|---3---", "E|-------"] {
            assert!(machine.tab_line(line, &mut out));
        }
        assert!(!machine.in_tab());
        assert!(!machine.tab_line("and then lyrics", &mut out));
        let song = out.finish();
        assert_eq!(tag_names(&song), vec!["start_of_tab", "end_of_tab"]);
        let literals = song
            .lines
            .iter()
            .flat_map(|l| &l.items)
            .filter(|i| matches!(i, Item::Literal { .. }))
            .count();
        assert_eq!(literals, 6);
    }

    #[test]
    fn test_non_tab_lines_inside_tab_are_literals() {
        let mut out = SongBuilder::new();
        let mut machine = SectionStateMachine::new();
        machine.tab_line("e|--0--", &mut out);
        assert!(machine.tab_line("   hammer-on here", &mut out));
        machine.finish(&mut out);
        let song = out.finish();
        assert_eq!(song.lines[2].items, vec![Item::literal("   hammer-on here")]);
        assert_eq!(tag_names(&song), vec!["start_of_tab", "end_of_tab"]);
    }

    #[test]
    fn test_comment_header_closes_verse() {
        let mut out = SongBuilder::new();
        let mut machine = SectionStateMachine::new();
        machine.open(Section::Verse, None, &mut out);
        machine.header(&lexer::header("[Bridge]").unwrap(), &mut out);
        assert_eq!(machine.state(), Section::None);
        assert_eq!(tag_names(&out.finish()), vec!["start_of_verse", "end_of_verse", "comment"]);
    }
}
