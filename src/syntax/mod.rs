//! Syntax highlighting for the script editor

mod highlighter;

pub use highlighter::{HighlightKind, highlight_line};
