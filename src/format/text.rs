//! Chords-over-words output.
//!
//! Metadata tags are gathered into a YAML front matter block, verse/chorus
//! starts become `[Verse 2]` style headers, and every pair line becomes a
//! padded chord line over its lyric line. A tab section is followed by a
//! blank line so the chords-over-words reader closes it at the same place.

use crate::align;
use crate::ast::{ChordLyricsPair, Item, Line, Section, Song, Tag, TagName};
use log::warn;
use serde_yaml::{Mapping, Value};

pub(super) fn format(song: &Song, lines: &[(Section, &Line)]) -> String {
    let mut out = Vec::new();
    front_matter(song, &mut out);

    for (i, (_, line)) in lines.iter().enumerate() {
        if line.is_empty() {
            out.push(String::new());
            continue;
        }

        let pairs: Vec<ChordLyricsPair> = line.pairs().cloned().collect();
        if !pairs.is_empty() {
            let (chords, lyrics) = align::render(&pairs);
            match (chords.is_empty(), lyrics.is_empty()) {
                (true, _) => out.push(lyrics),
                (false, true) => out.push(chords),
                (false, false) => {
                    out.push(chords);
                    out.push(lyrics);
                }
            }
            continue;
        }

        for item in &line.items {
            match item {
                Item::Tag(tag) if tag.name == TagName::EndOfTab => {
                    let next_is_blank = lines.get(i + 1).map(|(_, next)| next.is_empty());
                    if next_is_blank == Some(false) {
                        out.push(String::new());
                    }
                }
                Item::Tag(tag) => out.extend(header(tag)),
                Item::Comment { content } => out.push(format!("# {}", content)),
                Item::Literal { string } => out.push(string.clone()),
                Item::Pair(_) => {}
            }
        }
    }

    out.join("\n")
}

/// Section headers and bracketed comments; other tags have no text form.
fn header(tag: &Tag) -> Option<String> {
    let label = match tag.section_boundary() {
        Some((section @ (Section::Verse | Section::Chorus), true)) => section.label(),
        _ if tag.name == TagName::Comment => "",
        _ => return None,
    };
    let text = match (label, tag.value.as_deref()) {
        ("", None) => return None,
        ("", Some(value)) => value.to_string(),
        (label, None) => label.to_string(),
        (label, Some(value)) => format!("{} {}", label, value),
    };
    Some(format!("[{}]", text))
}

fn front_matter(song: &Song, out: &mut Vec<String>) {
    let mut mapping = Mapping::new();
    for tag in song.metadata() {
        if let Some(value) = &tag.value {
            mapping.insert(Value::String(tag.name.to_string()), scalar(value));
        }
    }
    if mapping.is_empty() {
        return;
    }

    match serde_yaml::to_string(&mapping) {
        Ok(yaml) => {
            out.push("---".to_string());
            out.extend(yaml.lines().map(str::to_string));
            out.push("---".to_string());
        }
        Err(e) => warn!("dropping front matter: {}", e),
    }
}

/// Integers go out unquoted (`capo: 2`) when that reads back the same.
fn scalar(value: &str) -> Value {
    match value.parse::<i64>() {
        Ok(n) if n.to_string() == value => Value::Number(n.into()),
        _ => Value::String(value.to_string()),
    }
}
