//! API modules exposed to embedded scripts
//!
//! Each submodule builds a `rhai::Module` registered on the host engine.

pub mod scene;
