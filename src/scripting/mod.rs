//! Scripting module - Rhai runtime for embedded scene scripts
//!
//! Scripts call a recording API (`move_object`, `create_circle`, ...). The
//! recorded command lines are replayed through the command dispatcher, so
//! the dispatcher stays the only code that mutates the scene.

mod api;
mod engine;

pub use engine::{BridgeError, RhaiHost, ScriptHost};
