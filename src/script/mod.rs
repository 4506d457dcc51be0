//! The line-oriented mini-language: variables, expressions and the interpreter

mod expr;
pub mod interpreter;
mod library;
mod variables;

pub use expr::evaluate;
pub use interpreter::{execute_line, execute_lines, execute_script};
pub use library::{
    COMMAND_SCRIPT_EXT, EMBEDDED_SCRIPT_EXT, Script, ScriptKind, ScriptLibrary,
    with_extension,
};
pub use variables::VariableStore;
