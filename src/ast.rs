//! # Song Document Model
//!
//! This module defines the in-memory representation every parser produces and
//! every formatter consumes.
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   └── Vec<Line>
//!         └── Vec<Item>
//!               ├── Pair(ChordLyricsPair { chords, lyrics })
//!               ├── Tag(Tag { name: TagName, value })
//!               ├── Comment { content }
//!               └── Literal { string }
//! ```
//!
//! ## Key Concepts
//!
//! ### Sections
//! A line does not store whether it belongs to a verse, chorus or tab block.
//! Section membership is inferred by walking the song and tracking the
//! `start_of_*`/`end_of_*` tags (see [`Song::sections`]).
//!
//! ### Tab blocks
//! Between `start_of_tab` and `end_of_tab` every item is a `Literal`; tab
//! notation is never split into chords and lyrics.
//!
//! ### Ownership
//! Parsers build and return a `Song`; the transposer takes it by value and
//! hands it back; formatters only borrow it.
//!
//! ## Related Modules
//! - `parser` - Creates these types from chord sheet text
//! - `transpose` - Rewrites chord symbols in place
//! - `format` - Serializes these types back to text/HTML
//! - `semantic` - Validates section nesting

use serde::Serialize;
use std::fmt;

/// A parsed chord sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Song {
    pub lines: Vec<Line>,
}

/// One rendered row of the sheet. Items keep their insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Line {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Pair(ChordLyricsPair),
    Tag(Tag),
    Comment { content: String },
    Literal { string: String },
}

/// Zero or one chord symbol sitting on top of a stretch of lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChordLyricsPair {
    pub chords: Option<String>,
    pub lyrics: Option<String>,
    /// Columns the chord occupied on a chord line with no lyrics under it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
}

impl ChordLyricsPair {
    pub fn new(chords: Option<&str>, lyrics: Option<&str>) -> Self {
        Self {
            chords: chords.filter(|c| !c.is_empty()).map(str::to_string),
            lyrics: lyrics.filter(|l| !l.is_empty()).map(str::to_string),
            width: None,
        }
    }

    /// Record the column span of a chord that has no lyrics below it.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn has_chords(&self) -> bool {
        self.chords.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn has_lyrics(&self) -> bool {
        self.lyrics.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// A directive item: section marker, metadata, comment or column break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: TagName,
    pub value: Option<String>,
}

impl Tag {
    pub fn new(name: TagName, value: Option<&str>) -> Self {
        Self {
            name,
            value: value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        }
    }

    pub fn start(section: Section, value: Option<&str>) -> Option<Self> {
        section.start_tag().map(|name| Self::new(name, value))
    }

    pub fn end(section: Section) -> Option<Self> {
        section.end_tag().map(|name| Self::new(name, None))
    }

    /// Returns `(section, is_start)` when this tag opens or closes a section.
    pub fn section_boundary(&self) -> Option<(Section, bool)> {
        match self.name {
            TagName::StartOfVerse => Some((Section::Verse, true)),
            TagName::EndOfVerse => Some((Section::Verse, false)),
            TagName::StartOfChorus => Some((Section::Chorus, true)),
            TagName::EndOfChorus => Some((Section::Chorus, false)),
            TagName::StartOfTab => Some((Section::Tab, true)),
            TagName::EndOfTab => Some((Section::Tab, false)),
            _ => None,
        }
    }

    pub fn is_metadata(&self) -> bool {
        matches!(
            self.name,
            TagName::Title
                | TagName::Subtitle
                | TagName::Artist
                | TagName::Capo
                | TagName::Key
                | TagName::Other(_)
        )
    }
}

/// Closed directive vocabulary; anything else is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagName {
    StartOfVerse,
    EndOfVerse,
    StartOfChorus,
    EndOfChorus,
    StartOfTab,
    EndOfTab,
    Title,
    Subtitle,
    Artist,
    Capo,
    Key,
    Comment,
    ColumnBreak,
    Other(String),
}

impl TagName {
    /// Parse a directive name, accepting the ChordPro short forms.
    /// Matching is case-insensitive; unknown names are lowercased into `Other`.
    pub fn parse(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "start_of_verse" | "sov" => TagName::StartOfVerse,
            "end_of_verse" | "eov" => TagName::EndOfVerse,
            "start_of_chorus" | "soc" => TagName::StartOfChorus,
            "end_of_chorus" | "eoc" => TagName::EndOfChorus,
            "start_of_tab" | "sot" => TagName::StartOfTab,
            "end_of_tab" | "eot" => TagName::EndOfTab,
            "title" | "t" => TagName::Title,
            "subtitle" | "st" => TagName::Subtitle,
            "artist" => TagName::Artist,
            "capo" => TagName::Capo,
            "key" => TagName::Key,
            "comment" | "c" => TagName::Comment,
            "column_break" | "colb" => TagName::ColumnBreak,
            _ => TagName::Other(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagName::StartOfVerse => "start_of_verse",
            TagName::EndOfVerse => "end_of_verse",
            TagName::StartOfChorus => "start_of_chorus",
            TagName::EndOfChorus => "end_of_chorus",
            TagName::StartOfTab => "start_of_tab",
            TagName::EndOfTab => "end_of_tab",
            TagName::Title => "title",
            TagName::Subtitle => "subtitle",
            TagName::Artist => "artist",
            TagName::Capo => "capo",
            TagName::Key => "key",
            TagName::Comment => "comment",
            TagName::ColumnBreak => "column_break",
            TagName::Other(name) => name,
        }
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section a line belongs to. `None` is the state outside any section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    None,
    Verse,
    Chorus,
    Tab,
}

impl Section {
    pub fn start_tag(self) -> Option<TagName> {
        match self {
            Section::None => None,
            Section::Verse => Some(TagName::StartOfVerse),
            Section::Chorus => Some(TagName::StartOfChorus),
            Section::Tab => Some(TagName::StartOfTab),
        }
    }

    pub fn end_tag(self) -> Option<TagName> {
        match self {
            Section::None => None,
            Section::Verse => Some(TagName::EndOfVerse),
            Section::Chorus => Some(TagName::EndOfChorus),
            Section::Tab => Some(TagName::EndOfTab),
        }
    }

    /// Human label used by the text and HTML formatters.
    pub fn label(self) -> &'static str {
        match self {
            Section::None => "",
            Section::Verse => "Verse",
            Section::Chorus => "Chorus",
            Section::Tab => "Tab",
        }
    }
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(item: Item) -> Self {
        Self { items: vec![item] }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.items.iter().filter_map(|item| match item {
            Item::Tag(tag) => Some(tag),
            _ => None,
        })
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ChordLyricsPair> {
        self.items.iter().filter_map(|item| match item {
            Item::Pair(pair) => Some(pair),
            _ => None,
        })
    }
}

impl Item {
    pub fn pair(chords: Option<&str>, lyrics: Option<&str>) -> Self {
        Item::Pair(ChordLyricsPair::new(chords, lyrics))
    }

    pub fn comment(content: &str) -> Self {
        Item::Comment {
            content: content.to_string(),
        }
    }

    pub fn literal(string: &str) -> Self {
        Item::Literal {
            string: string.to_string(),
        }
    }
}

impl Song {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata tags (title, artist, ...) in document order.
    pub fn metadata(&self) -> impl Iterator<Item = &Tag> {
        self.lines
            .iter()
            .flat_map(Line::tags)
            .filter(|tag| tag.is_metadata())
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata()
            .find(|tag| tag.name == TagName::Title)
            .and_then(|tag| tag.value.as_deref())
    }

    /// Pair every line with the section it sits in.
    ///
    /// A line carrying a start tag reports the section it opens; a line
    /// carrying an end tag reports the section it closes.
    pub fn sections(&self) -> Vec<(Section, &Line)> {
        let mut current = Section::None;
        self.lines
            .iter()
            .map(|line| {
                let mut reported = current;
                for tag in line.tags() {
                    match tag.section_boundary() {
                        Some((section, true)) => {
                            current = section;
                            reported = section;
                        }
                        Some((section, false)) => {
                            reported = section;
                            current = Section::None;
                        }
                        None => {}
                    }
                }
                (reported, line)
            })
            .collect()
    }

    /// Every chord text in document order, unparsed.
    pub fn chord_texts(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .flat_map(Line::pairs)
            .filter_map(|pair| pair.chords.as_deref())
            .filter(|chords| !chords.is_empty())
    }
}
