use serde::{Deserialize, Serialize};

use crate::script::VariableStore;

/// A saved variable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedVariable {
    pub name: String,
    pub value: f32,
}

/// Project-level state that is not a script or the scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<SavedVariable>,
    /// Scripts that had editor tabs open when the project was saved
    #[serde(default)]
    pub open_scripts: Vec<String>,
}

impl Manifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_variables(mut self, vars: &VariableStore) -> Self {
        self.variables = vars
            .iter()
            .map(|(name, value)| SavedVariable {
                name: name.to_string(),
                value,
            })
            .collect();
        self
    }
}
