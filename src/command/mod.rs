//! Command bar dispatch
//!
//! One line, one verb. Every verb lives in a static table with its arity and
//! usage hint, so unknown and malformed commands are reported uniformly.

mod dispatcher;
mod verbs;

pub use dispatcher::{CommandError, execute, report};
pub use verbs::VERBS;
