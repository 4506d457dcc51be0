//! Line tokenizer for editor colouring
//!
//! Both script languages are line oriented enough that a per-line scan is
//! all the editor needs: no state carries from one line to the next.

use crate::script::ScriptKind;

/// A highlight span within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize, // Column start (char index within line)
    pub end: usize,   // Column end, exclusive
    pub kind: HighlightKind,
}

/// Types of syntax elements for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Keyword,
    Function,
    String,
    Number,
    Comment,
    Variable,
    Operator,
}

const COMMAND_KEYWORDS: &[&str] = &[
    "move",
    "setPos",
    "setColor",
    "createCircle",
    "createRect",
    "log",
    "for",
];

const RHAI_KEYWORDS: &[&str] = &[
    "let", "const", "fn", "for", "in", "if", "else", "while", "loop", "do", "until", "return",
    "break", "continue", "throw", "true", "false",
];

const RHAI_FUNCTIONS: &[&str] = &[
    "move_object",
    "set_position",
    "set_color",
    "create_circle",
    "create_rect",
    "delete_obj",
    "log_message",
];

struct Rules {
    comment: &'static str,
    keywords: &'static [&'static str],
    functions: &'static [&'static str],
}

impl Rules {
    fn for_kind(kind: ScriptKind) -> Self {
        match kind {
            ScriptKind::EmbeddedScript => Rules {
                comment: "//",
                keywords: RHAI_KEYWORDS,
                functions: RHAI_FUNCTIONS,
            },
            ScriptKind::CommandScript | ScriptKind::PlainFile => Rules {
                comment: "#",
                keywords: COMMAND_KEYWORDS,
                functions: &[],
            },
        }
    }
}

/// Highlight spans for one line, in order, non-overlapping.
/// Whitespace and unclassified characters get no span.
pub fn highlight_line(line: &str, kind: ScriptKind) -> Vec<Highlight> {
    let rules = Rules::for_kind(kind);
    let chars: Vec<char> = line.chars().collect();
    let comment: Vec<char> = rules.comment.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let start = i;

        if chars[i..].starts_with(&comment) {
            spans.push(Highlight {
                start,
                end: chars.len(),
                kind: HighlightKind::Comment,
            });
            break;
        }

        let kind = if ch == '"' {
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                i += 1;
            }
            // Closing quote, if any
            i = (i + 1).min(chars.len());
            Some(HighlightKind::String)
        } else if ch.is_ascii_digit() || (ch == '.' && next_is_digit(&chars, i)) {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            Some(HighlightKind::Number)
        } else if ch.is_alphabetic() || ch == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            Some(classify_word(&word, &rules))
        } else if "+-*/=<>!(){}[],;".contains(ch) {
            i += 1;
            Some(HighlightKind::Operator)
        } else {
            i += 1;
            None
        };

        if let Some(kind) = kind {
            spans.push(Highlight {
                start,
                end: i,
                kind,
            });
        }
    }

    spans
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

fn classify_word(word: &str, rules: &Rules) -> HighlightKind {
    if rules.keywords.contains(&word) {
        HighlightKind::Keyword
    } else if rules.functions.contains(&word) {
        HighlightKind::Function
    } else {
        HighlightKind::Variable
    }
}
