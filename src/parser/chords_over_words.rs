//! Two-line "chords over words" sheets, plus the body loop the raw dialect
//! reuses with a different chord-line predicate.

use super::builder::{LineReader, SongBuilder};
use crate::align;
use crate::ast::{Song, Tag, TagName};
use crate::error::ChordSheetError;
use crate::lexer;
use crate::section::SectionStateMachine;
use serde_yaml::{Mapping, Value};

const FRONT_MATTER_FENCE: &str = "---";

/// What makes a line a chord line in a given dialect.
pub(super) trait ChordLineRule {
    /// The chord line with any markup removed, or `None` for other lines.
    fn chord_line(&self, line: &str) -> Option<String>;

    /// Whether a blank line ends an inferred tab section.
    fn blank_closes_tab(&self) -> bool;
}

/// Every whitespace-separated token must be a chord.
struct AllTokensAreChords;

impl ChordLineRule for AllTokensAreChords {
    fn chord_line(&self, line: &str) -> Option<String> {
        lexer::is_chord_line(line).then(|| line.to_string())
    }

    fn blank_closes_tab(&self) -> bool {
        true
    }
}

pub(super) fn parse(source: &str) -> Result<Song, ChordSheetError> {
    let mut reader = LineReader::new(source);
    let mut out = SongBuilder::new();
    for tag in front_matter(&mut reader)? {
        out.push_tag(tag);
    }

    let mut machine = SectionStateMachine::new();
    parse_body(&mut reader, &AllTokensAreChords, &mut machine, &mut out);
    machine.finish(&mut out);
    Ok(out.finish())
}

/// Consume a leading `---` fenced block, if present.
fn front_matter(reader: &mut LineReader<'_>) -> Result<Vec<Tag>, ChordSheetError> {
    if reader.peek().map(str::trim) != Some(FRONT_MATTER_FENCE) {
        return Ok(Vec::new());
    }
    reader.next();

    let mut yaml = String::new();
    loop {
        match reader.next() {
            Some(line) if line.trim() == FRONT_MATTER_FENCE => break,
            Some(line) => {
                yaml.push_str(line);
                yaml.push('\n');
            }
            None => {
                return Err(ChordSheetError::Frontmatter(
                    "missing closing `---`".to_string(),
                ))
            }
        }
    }
    parse_front_matter(&yaml)
}

/// Parse a YAML mapping of metadata into tags, in document order.
///
/// # Errors
/// `Frontmatter` when the text is not a mapping, a value is not a scalar, or
/// a key names a non-metadata directive such as `comment`.
pub fn parse_front_matter(yaml: &str) -> Result<Vec<Tag>, ChordSheetError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mapping: Mapping =
        serde_yaml::from_str(yaml).map_err(|e| ChordSheetError::Frontmatter(e.to_string()))?;

    let mut tags = Vec::with_capacity(mapping.len());
    for (key, value) in &mapping {
        let key = scalar(key)
            .ok_or_else(|| ChordSheetError::Frontmatter(format!("invalid key {:?}", key)))?;
        let value = match value {
            Value::Null => None,
            other => Some(scalar(other).ok_or_else(|| {
                ChordSheetError::Frontmatter(format!("value of `{}` must be a scalar", key))
            })?),
        };
        let tag = Tag::new(TagName::parse(&key), value.as_deref());
        if !tag.is_metadata() {
            return Err(ChordSheetError::Frontmatter(format!(
                "`{}` is not a metadata key",
                key
            )));
        }
        tags.push(tag);
    }
    Ok(tags)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A line that can sit under a chord line as its lyrics.
fn is_lyric_line(line: &str, rule: &dyn ChordLineRule) -> bool {
    !lexer::is_blank(line)
        && rule.chord_line(line).is_none()
        && !lexer::is_tab_line(line)
        && lexer::header(line).is_none()
        && lexer::comment(line).is_none()
}

/// Shared line loop for the two-line dialects. Leaves the machine open so the
/// caller decides when the song ends.
pub(super) fn parse_body(
    reader: &mut LineReader<'_>,
    rule: &dyn ChordLineRule,
    machine: &mut SectionStateMachine,
    out: &mut SongBuilder,
) {
    while let Some(line) = reader.next() {
        if machine.in_tab() && lexer::is_blank(line) && rule.blank_closes_tab() {
            machine.close(out);
            out.push_blank();
            continue;
        }
        if machine.tab_line(line, out) {
            continue;
        }
        if lexer::is_blank(line) {
            out.push_blank();
            continue;
        }

        if let Some(chords) = rule.chord_line(line) {
            let pairs = match reader.peek().filter(|next| is_lyric_line(next, rule)) {
                Some(lyrics) => {
                    reader.next();
                    align::align(&chords, lyrics)
                }
                None => align::align(&chords, ""),
            };
            out.push_pairs(pairs);
        } else if let Some(header) = lexer::header(line) {
            machine.header(&header, out);
        } else if let Some(comment) = lexer::comment(line) {
            out.push_comment(comment);
        } else {
            out.push_pairs(align::align("", line));
        }
    }
}
