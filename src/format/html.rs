//! HTML `<div>` rendering for a read-only view.
//!
//! ```text
//! <h1 class="title">Let It Be</h1>
//! <div class="chord-sheet">
//!   <div class="paragraph chorus">
//!     <div class="row">
//!       <div class="column"><div class="chord">C</div><div class="lyrics">Let it </div></div>
//!     </div>
//!   </div>
//! </div>
//! ```
//! Paragraphs break at blank lines and at section boundaries.

use crate::ast::{ChordLyricsPair, Item, Line, Section, Song, TagName};
use quick_xml::escape::escape;

struct HtmlWriter {
    html: String,
    paragraph_open: bool,
}

impl HtmlWriter {
    fn push_line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.html.push_str("  ");
        }
        self.html.push_str(text);
        self.html.push('\n');
    }

    fn open_paragraph(&mut self, section: Section) {
        self.close_paragraph();
        let class = match section {
            Section::None => "paragraph".to_string(),
            section => format!("paragraph {}", section.label().to_ascii_lowercase()),
        };
        self.push_line(1, &format!("<div class=\"{}\">", class));
        self.paragraph_open = true;
    }

    fn close_paragraph(&mut self) {
        if self.paragraph_open {
            self.push_line(1, "</div>");
            self.paragraph_open = false;
        }
    }

    fn row(&mut self, section: Section, content: &str) {
        if !self.paragraph_open {
            self.open_paragraph(section);
        }
        self.push_line(2, "<div class=\"row\">");
        self.push_line(3, content);
        self.push_line(2, "</div>");
    }
}

pub(super) fn format(song: &Song, lines: &[(Section, &Line)]) -> String {
    let mut writer = HtmlWriter {
        html: String::new(),
        paragraph_open: false,
    };

    for tag in song.metadata() {
        let Some(value) = tag.value.as_deref() else { continue };
        match tag.name {
            TagName::Title => writer.push_line(0, &format!("<h1 class=\"title\">{}</h1>", escape(value))),
            TagName::Subtitle | TagName::Artist => writer.push_line(
                0,
                &format!("<h2 class=\"{}\">{}</h2>", tag.name, escape(value)),
            ),
            _ => {}
        }
    }

    writer.push_line(0, "<div class=\"chord-sheet\">");
    for &(section, line) in lines {
        if line.is_empty() {
            writer.close_paragraph();
            continue;
        }

        let pairs: Vec<&ChordLyricsPair> = line.pairs().collect();
        if !pairs.is_empty() {
            let columns: String = pairs.into_iter().map(column).collect();
            writer.row(section, &columns);
            continue;
        }

        for item in &line.items {
            match item {
                Item::Tag(tag) => match tag.section_boundary() {
                    Some((section, true)) => {
                        writer.open_paragraph(section);
                        if let Some(value) = tag.value.as_deref() {
                            writer.push_line(
                                2,
                                &format!(
                                    "<h3 class=\"label\">{} {}</h3>",
                                    section.label(),
                                    escape(value)
                                ),
                            );
                        }
                    }
                    Some((_, false)) => writer.close_paragraph(),
                    None if tag.name == TagName::Comment => {
                        if let Some(value) = tag.value.as_deref() {
                            let content = format!("<div class=\"comment\">{}</div>", escape(value));
                            writer.row(section, &content);
                        }
                    }
                    None => {}
                },
                Item::Comment { content } => {
                    let content = format!("<div class=\"comment\">{}</div>", escape(content));
                    writer.row(section, &content);
                }
                Item::Literal { string } => {
                    let content = format!("<pre class=\"literal\">{}</pre>", escape(string));
                    writer.row(section, &content);
                }
                Item::Pair(_) => {}
            }
        }
    }
    writer.close_paragraph();
    writer.push_line(0, "</div>");

    writer.html
}

fn column(pair: &ChordLyricsPair) -> String {
    format!(
        "<div class=\"column\"><div class=\"chord\">{}</div><div class=\"lyrics\">{}</div></div>",
        escape(pair.chords.as_deref().unwrap_or("")),
        escape(pair.lyrics.as_deref().unwrap_or(""))
    )
}
