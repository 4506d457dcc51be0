use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rhai::{Engine, Scope};

use super::Settings;

/// The Rhai engine that evaluates `init.rhai`
pub struct ConfigEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
}

/// Register a setter that stores a clamped count into `Settings`
macro_rules! count_setter {
    ($engine:expr, $settings:expr, $name:literal, $field:ident, $min:expr, $max:expr) => {{
        let s = Arc::clone(&$settings);
        $engine.register_fn($name, move |value: i64| {
            if let Ok(mut settings) = s.write() {
                settings.$field = value.clamp($min, $max) as _;
            }
        });
    }};
}

impl ConfigEngine {
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self { engine, settings }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // Limit script execution for safety
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_project", move |name: &str| {
                if let Ok(mut settings) = s.write() {
                    settings.project = name.to_string();
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("get_project", move || -> String {
                s.read().map(|s| s.project.clone()).unwrap_or_default()
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_projects_dir", move |path: &str| {
                if let Ok(mut settings) = s.write() {
                    settings.projects_dir = PathBuf::from(path);
                }
            });
        }

        count_setter!(engine, settings, "set_max_objects", max_objects, 1, 10_000);
        count_setter!(engine, settings, "set_max_variables", max_variables, 1, 10_000);
        count_setter!(engine, settings, "set_max_scripts", max_scripts, 1, 1_000);
        count_setter!(engine, settings, "set_max_open_editors", max_open_editors, 1, 64);
        count_setter!(engine, settings, "set_log_capacity", log_capacity, 1, 10_000);
        count_setter!(engine, settings, "set_tick_ms", tick_ms, 1, 1_000);
        count_setter!(
            engine,
            settings,
            "set_max_script_operations",
            max_script_operations,
            1_000,
            100_000_000
        );

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_canvas_scale", move |units: f64| {
                if let Ok(mut settings) = s.write() {
                    settings.canvas_units_per_cell = units.clamp(0.1, 1_000.0) as f32;
                }
            });
        }

        engine.on_print(|msg| log::info!("[init.rhai] {}", msg));

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &Path) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        self.eval(&content)
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<(), String> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| format!("Config parse error: {}", e))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| format!("Config error: {}", e))
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("easel"))
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("init.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<(), String> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}
