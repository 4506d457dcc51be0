//! The state scripts act on: scene, variables and the console

use crate::config::Settings;
use crate::console::Console;
use crate::scene::Scene;
use crate::script::VariableStore;

pub struct World {
    pub scene: Scene,
    pub variables: VariableStore,
    pub console: Console,
}

impl World {
    pub fn new(settings: &Settings) -> Self {
        Self {
            scene: Scene::new(settings.max_objects),
            variables: VariableStore::new(settings.max_variables),
            console: Console::new(settings.log_capacity),
        }
    }

    /// Store a variable. A full store drops the value without telling the user.
    pub fn set_variable(&mut self, name: &str, value: f32) {
        if let Err(e) = self.variables.set(name, value) {
            log::debug!("dropping {} = {}: {}", name, value, e);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
