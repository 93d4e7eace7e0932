pub mod align;
pub mod api;
pub mod ast;
pub mod chord;
pub mod config;
pub mod error;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod section;
pub mod semantic;
pub mod transpose;

pub use api::{convert, distinct_chords, format_song, parse_bytes, parse_song};
pub use ast::*;
pub use config::FormatOptions;
pub use error::*;
pub use format::Format;
pub use parser::Dialect;
pub use semantic::validate;
pub use transpose::{transpose, transpose_chord};
