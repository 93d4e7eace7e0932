use crate::ast::{Item, Line, Section, Tag};

pub(super) fn format(lines: &[(Section, &Line)]) -> String {
    lines
        .iter()
        .map(|(_, line)| line.items.iter().map(item).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn item(item: &Item) -> String {
    match item {
        Item::Pair(pair) => {
            let lyrics = pair.lyrics.as_deref().unwrap_or("");
            match pair.chords.as_deref() {
                Some(chords) => format!("[{}]{}", chords, lyrics),
                None => lyrics.to_string(),
            }
        }
        Item::Tag(tag) => directive(tag),
        Item::Comment { content } => format!("# {}", content),
        Item::Literal { string } => string.clone(),
    }
}

fn directive(tag: &Tag) -> String {
    match &tag.value {
        Some(value) => format!("{{{}: {}}}", tag.name, value),
        None => format!("{{{}}}", tag.name),
    }
}
