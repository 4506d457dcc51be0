use std::path::PathBuf;

use thiserror::Error;

use super::verbs;
use crate::console::Console;
use crate::editor::TabError;
use crate::project::ProjectError;
use crate::scene::SceneError;
use crate::scripting::BridgeError;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum CommandError {
    /// Wrong argument count or a non-numeric literal
    #[error("malformed arguments")]
    Usage,
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("script file '{name}' not found at path: {}", .path.display())]
    MissingFile { name: String, path: PathBuf },
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Tabs(#[from] TabError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Run one command line against the session.
///
/// Failures are written to the console; nothing is returned to the caller.
pub fn execute(session: &mut Session, line: &str) {
    let mut tokens = line.split_whitespace();
    let Some(word) = tokens.next() else {
        session.world.console.warn("Empty command");
        return;
    };
    let args: Vec<&str> = tokens.collect();

    let Some(verb) = verbs::find(word) else {
        session
            .world
            .console
            .warn(format!("Unknown command: {}", word));
        return;
    };

    let result = if args.len() < verb.arity {
        Err(CommandError::Usage)
    } else {
        (verb.run)(session, &args)
    };

    match result {
        Ok(()) => {}
        Err(CommandError::Usage) => session
            .world
            .console
            .warn(format!("Usage: {}", verb.usage)),
        Err(e) => report(&mut session.world.console, &e),
    }
}

/// Write a command failure to the console
pub fn report(console: &mut Console, err: &CommandError) {
    match err {
        CommandError::Usage => console.warn("Usage error"),
        other => console.error(format!("Error: {}", other)),
    }
}
