use std::path::PathBuf;

/// Editor settings that can be customized via Rhai config
#[derive(Debug, Clone)]
pub struct Settings {
    // Project
    pub projects_dir: PathBuf,
    pub project: String,

    // Capacities
    pub max_objects: usize,
    pub max_variables: usize,
    pub max_scripts: usize,
    pub max_open_editors: usize,
    pub log_capacity: usize,

    // Runtime
    pub tick_ms: u64,
    pub max_script_operations: u64,

    // Canvas: world units covered by one terminal column (rows cover twice that)
    pub canvas_units_per_cell: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("Projects"),
            project: "Default".to_string(),

            max_objects: 100,
            max_variables: 64,
            max_scripts: 32,
            max_open_editors: 8,
            log_capacity: 100,

            tick_ms: 16,
            max_script_operations: 100_000,

            canvas_units_per_cell: 10.0,
        }
    }
}
