//! The embedded script host
//!
//! Embedded scripts describe scene changes; they never apply them. A run
//! returns the recorded command lines, and only a run that finished without
//! an error returns anything at all.

use std::sync::{Arc, RwLock};

use rhai::{Engine, Scope};
use thiserror::Error;

use super::api;
use super::api::scene::Recorder;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("embedded scripting is not initialized")]
    NotInitialized,
    #[error("script parse error: {0}")]
    Compile(String),
    #[error("script error: {0}")]
    Runtime(String),
}

/// Narrow contract between the editor and an embedded language runtime
pub trait ScriptHost {
    fn init(&mut self) -> Result<(), BridgeError>;

    /// Run `source` and return the command lines it recorded, in call order
    fn run(&mut self, source: &str) -> Result<Vec<String>, BridgeError>;

    fn finalize(&mut self);
}

/// Rhai-backed script host
pub struct RhaiHost {
    engine: Option<Engine>,
    recorder: Recorder,
    max_operations: u64,
}

impl RhaiHost {
    pub fn new(max_operations: u64) -> Self {
        Self {
            engine: None,
            recorder: Arc::new(RwLock::new(Vec::new())),
            max_operations,
        }
    }

    fn create_engine(&self) -> Engine {
        let mut engine = Engine::new();

        // A runaway script would otherwise freeze the editor
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(self.max_operations);

        let scene_module = api::scene::create_module(Arc::clone(&self.recorder));
        engine.register_global_module(scene_module.into());

        engine.on_print(|msg| log::info!("[rhai] {}", msg));
        engine.on_debug(|msg, src, pos| {
            log::debug!("[rhai] {} @ {:?} {}", msg, src, pos);
        });

        engine
    }

    fn clear_recorder(&self) {
        if let Ok(mut commands) = self.recorder.write() {
            commands.clear();
        }
    }
}

impl ScriptHost for RhaiHost {
    fn init(&mut self) -> Result<(), BridgeError> {
        self.engine = Some(self.create_engine());
        log::info!("Rhai host initialized with scene API");
        Ok(())
    }

    fn run(&mut self, source: &str) -> Result<Vec<String>, BridgeError> {
        let engine = self.engine.as_ref().ok_or(BridgeError::NotInitialized)?;
        self.clear_recorder();

        let ast = engine
            .compile(source)
            .map_err(|e| BridgeError::Compile(e.to_string()))?;

        let mut scope = Scope::new();
        if let Err(e) = engine.run_ast_with_scope(&mut scope, &ast) {
            self.clear_recorder();
            return Err(BridgeError::Runtime(e.to_string()));
        }

        let commands = self
            .recorder
            .write()
            .map(|mut c| std::mem::take(&mut *c))
            .unwrap_or_default();
        Ok(commands)
    }

    fn finalize(&mut self) {
        if self.engine.take().is_some() {
            self.clear_recorder();
            log::info!("Rhai host finalized");
        }
    }
}
