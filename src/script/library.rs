use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Extension of mini-language scripts
pub const COMMAND_SCRIPT_EXT: &str = "script";
/// Extension of embedded (Rhai) scripts
pub const EMBEDDED_SCRIPT_EXT: &str = "rhai";

/// What a script is, derived from its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    PlainFile,
    CommandScript,
    EmbeddedScript,
}

impl ScriptKind {
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        match ext.as_deref() {
            Some(COMMAND_SCRIPT_EXT) => ScriptKind::CommandScript,
            Some(EMBEDDED_SCRIPT_EXT) => ScriptKind::EmbeddedScript,
            _ => ScriptKind::PlainFile,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScriptKind::PlainFile => "file",
            ScriptKind::CommandScript => "custom script",
            ScriptKind::EmbeddedScript => "Rhai script",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Append `ext` to `name` unless it already carries it
pub fn with_extension(name: &str, ext: &str) -> String {
    let suffix = format!(".{}", ext);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// A script as loaded from (or saved to) the project
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub name: String,
    pub lines: Vec<String>,
}

impl Script {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.lines().map(str::to_string).collect())
    }

    pub fn kind(&self) -> ScriptKind {
        ScriptKind::from_name(&self.name)
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LibraryError {
    #[error("script limit reached ({0})")]
    Full(usize),
}

/// The scripts loaded for the current project
pub struct ScriptLibrary {
    scripts: Vec<Script>,
    capacity: usize,
}

impl ScriptLibrary {
    pub fn new(capacity: usize) -> Self {
        Self {
            scripts: Vec::new(),
            capacity,
        }
    }

    pub fn find(&self, name: &str) -> Option<&Script> {
        self.scripts.iter().find(|s| s.name == name)
    }

    /// Add a script, replacing any script with the same name
    pub fn insert(&mut self, script: Script) -> Result<(), LibraryError> {
        if let Some(existing) = self.scripts.iter_mut().find(|s| s.name == script.name) {
            *existing = script;
            return Ok(());
        }
        if self.scripts.len() >= self.capacity {
            return Err(LibraryError::Full(self.capacity));
        }
        self.scripts.push(script);
        Ok(())
    }

    /// Replace the whole library, keeping at most `capacity` scripts.
    /// Returns how many were dropped.
    pub fn replace_all(&mut self, scripts: Vec<Script>) -> usize {
        self.scripts.clear();
        let mut dropped = 0;
        for script in scripts {
            if self.insert(script).is_err() {
                dropped += 1;
            }
        }
        dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &Script> {
        self.scripts.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }
}

impl Default for ScriptLibrary {
    fn default() -> Self {
        Self::new(32)
    }
}
