use super::builder::{LineReader, SongBuilder};
use crate::ast::{ChordLyricsPair, Section, Song, Tag, TagName};
use crate::section::SectionStateMachine;

/// Split `{name: value}` / `{name}` into its parts.
fn directive(line: &str) -> Option<(TagName, Option<&str>)> {
    let inner = line.trim().strip_prefix('{')?.strip_suffix('}')?;
    let (name, value) = match inner.split_once(':') {
        Some((name, value)) => (name, Some(value.trim())),
        None => (inner, None),
    };
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((TagName::parse(name), value.filter(|v| !v.is_empty())))
}

/// Split a lyric line on `[Chord]` markers.
fn inline_pairs(line: &str) -> Vec<ChordLyricsPair> {
    let mut pairs = Vec::new();
    let mut chords: Option<&str> = None;
    let mut rest = line;

    loop {
        let Some(open) = rest.find('[') else { break };
        let Some(close) = rest[open..].find(']').map(|i| open + i) else { break };
        let lyrics = &rest[..open];
        if chords.is_some() || !lyrics.is_empty() {
            pairs.push(ChordLyricsPair::new(chords, Some(lyrics)));
        }
        chords = Some(rest[open + 1..close].trim());
        rest = &rest[close + 1..];
    }
    if chords.is_some() || !rest.is_empty() {
        pairs.push(ChordLyricsPair::new(chords, Some(rest)));
    }
    pairs
}

pub(super) fn parse(source: &str) -> Song {
    let mut reader = LineReader::new(source);
    let mut machine = SectionStateMachine::new();
    let mut out = SongBuilder::new();

    while let Some(line) = reader.next() {
        let parsed = directive(line);

        if machine.in_tab() && !matches!(parsed, Some((TagName::EndOfTab, _))) {
            out.push_literal(line);
            continue;
        }

        if let Some((name, value)) = parsed {
            let tag = Tag::new(name, value);
            match tag.section_boundary() {
                Some((section, true)) => machine.open(section, tag.value.as_deref(), &mut out),
                Some((section, false)) => machine.end(section, &mut out),
                None => out.push_tag(tag),
            }
            continue;
        }

        if line.trim().is_empty() {
            out.push_blank();
        } else if let Some(comment) = line.strip_prefix('#') {
            out.push_comment(comment.trim());
        } else {
            out.push_pairs(inline_pairs(line));
        }
    }

    if machine.state() != Section::None {
        log::debug!(
            "closing {:?} left open at line {}",
            machine.state(),
            reader.line_number()
        );
    }
    machine.finish(&mut out);
    out.finish()
}
