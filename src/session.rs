//! The editing session: the world plus everything that feeds it scripts

use crate::command::{self, CommandError};
use crate::config::Settings;
use crate::editor::{TabError, Tabs};
use crate::project::{Manifest, Project, ProjectError};
use crate::scene::{Rgba, Shape, Vec2};
use crate::script::{self, Script, ScriptKind, ScriptLibrary};
use crate::scripting::{BridgeError, RhaiHost, ScriptHost};
use crate::world::World;

pub struct Session {
    pub world: World,
    pub library: ScriptLibrary,
    pub tabs: Tabs,
    pub project: Project,
    /// Batch run: plain script files run once per tick while set
    pub running: bool,
    host: Option<Box<dyn ScriptHost>>,
    settings: Settings,
}

impl Session {
    /// An empty session for the configured project. Nothing is read from disk.
    pub fn new(settings: Settings, host: Option<Box<dyn ScriptHost>>) -> Self {
        let mut world = World::new(&settings);
        let host = host.and_then(|h| start_host(h, &mut world));

        Self {
            world,
            library: ScriptLibrary::new(settings.max_scripts),
            tabs: Tabs::new(settings.max_open_editors),
            project: Project::new(&settings.projects_dir, &settings.project),
            running: false,
            host,
            settings,
        }
    }

    /// Start up on the configured project: load its scripts, scene and
    /// variables, and bring up the Rhai host.
    pub fn open(settings: Settings) -> Self {
        let host = Box::new(RhaiHost::new(settings.max_script_operations));
        let mut session = Self::new(settings, Some(host));
        session.load_project();
        session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    fn load_project(&mut self) {
        if let Err(e) = self.project.ensure() {
            self.world.console.error(format!("Error: {}", e));
        }

        match self.project.load_all() {
            Ok(scripts) => {
                let found = scripts.len();
                let dropped = self.library.replace_all(scripts);
                if dropped > 0 {
                    self.world.console.warn(format!(
                        "Script library full, {} of {} scripts not loaded",
                        dropped, found
                    ));
                }
                self.world.console.info(format!(
                    "Loaded {} scripts from project '{}'",
                    self.library.len(),
                    self.project.name()
                ));
            }
            Err(e) => self.world.console.error(format!("Error: {}", e)),
        }

        match self.project.load_scene() {
            Ok(Some(objects)) => {
                for object in objects {
                    let name = object.name.clone();
                    if let Err(e) = self.world.scene.insert(object) {
                        self.world
                            .console
                            .warn(format!("Skipping '{}': {}", name, e));
                    }
                }
            }
            Ok(None) => self.add_default_scene(),
            Err(e) => {
                self.world.console.error(format!("Error: {}", e));
                self.add_default_scene();
            }
        }

        let manifest = match self.project.load_manifest() {
            Ok(manifest) => manifest,
            Err(e) => {
                self.world.console.error(format!("Error: {}", e));
                None
            }
        };
        match manifest {
            Some(manifest) => {
                for var in &manifest.variables {
                    self.world.set_variable(&var.name, var.value);
                }
                for name in &manifest.open_scripts {
                    if let Err(e) = self.tabs.open(name, &self.library) {
                        self.world.console.warn(format!("Error: {}", e));
                    }
                }
            }
            None => {
                self.world.set_variable("speed", 5.0);
                self.world.set_variable("angle", 0.0);
            }
        }
    }

    fn add_default_scene(&mut self) {
        let scene = &mut self.world.scene;
        let defaults = [
            ("player", Shape::Circle, Vec2::new(500.0, 300.0), 40.0, Rgba::RED),
            ("box", Shape::Rect, Vec2::new(700.0, 350.0), 50.0, Rgba::BLUE),
        ];
        for (name, shape, position, size, color) in defaults {
            if let Err(e) = scene.add(name, shape, position, size, color) {
                log::warn!("default object '{}' not added: {}", name, e);
            }
        }
    }

    /// Run one command bar line
    pub fn execute(&mut self, line: &str) {
        command::execute(self, line);
    }

    /// Focus or open an editor tab for `name`
    pub fn open_editor(&mut self, name: &str) -> Result<(), TabError> {
        if self.tabs.open(name, &self.library)? {
            let kind = ScriptKind::from_name(name);
            self.world
                .console
                .info(format!("Opened {} '{}'", kind, name));
        }
        Ok(())
    }

    /// Run a loaded script through the mini-language interpreter
    pub fn run_script(&mut self, name: &str) -> bool {
        script::execute_script(&mut self.world, &self.library, name)
    }

    /// Run an embedded script file from the project's scripts directory
    pub fn run_embedded(&mut self, name: &str) -> Result<(), CommandError> {
        let path = self.project.script_path(name)?;
        if !path.is_file() {
            return Err(CommandError::MissingFile {
                name: name.to_string(),
                path,
            });
        }
        let source = self.project.read_script(name)?;
        self.run_embedded_source(name, &source)
    }

    /// Run embedded source and replay what it recorded.
    ///
    /// A script that fails part way applies nothing.
    pub fn run_embedded_source(&mut self, label: &str, source: &str) -> Result<(), CommandError> {
        let host = self.host.as_mut().ok_or(BridgeError::NotInitialized)?;
        let commands = host.run(source)?;

        log::debug!("'{}' recorded {} commands", label, commands.len());
        for line in &commands {
            command::execute(self, line);
        }
        self.world
            .console
            .info(format!("Executed Rhai script '{}'", label));
        Ok(())
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        let state = if self.running { "started" } else { "stopped" };
        self.world.console.info(format!("Batch run {}", state));
    }

    /// One frame of batch running
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        for script in self.library.iter() {
            if script.kind() == ScriptKind::PlainFile {
                script::execute_lines(&mut self.world, script.lines.iter().map(String::as_str));
            }
        }
    }

    /// Run the active editor buffer, saved or not
    pub fn run_active_editor(&mut self) {
        let Some(tab) = self.tabs.active() else {
            self.world.console.warn("No open editor");
            return;
        };
        let name = tab.name.clone();
        let kind = tab.kind;
        let lines = tab.lines();

        match kind {
            ScriptKind::EmbeddedScript => {
                let source = lines.join("\n");
                if let Err(e) = self.run_embedded_source(&name, &source) {
                    command::report(&mut self.world.console, &e);
                }
            }
            _ => {
                script::execute_lines(&mut self.world, lines.iter().map(String::as_str));
                self.world
                    .console
                    .info(format!("Executed buffer '{}'", name));
            }
        }
    }

    /// Write the active buffer to disk and into the library
    pub fn save_active_editor(&mut self) {
        let Some(tab) = self.tabs.active() else {
            self.world.console.warn("No open editor");
            return;
        };
        let script = Script::new(tab.name.clone(), tab.lines());

        if let Err(e) = self.project.save_one(&script) {
            self.world.console.error(format!("Error: {}", e));
            return;
        }
        if let Some(tab) = self.tabs.active_mut() {
            tab.buffer.mark_clean();
        }

        let name = script.name.clone();
        match self.library.insert(script) {
            Ok(()) => self.world.console.info(format!("Saved '{}'", name)),
            Err(e) => self
                .world
                .console
                .warn(format!("Saved '{}' to disk but not loaded: {}", name, e)),
        }
    }

    /// Persist scene, scripts and variables under project `name`, which
    /// becomes the current project.
    pub fn save_project_as(&mut self, name: &str) -> Result<(), ProjectError> {
        let project = Project::named(&self.settings.projects_dir, name)?;
        project.ensure()?;
        project.save_scene(&self.world.scene)?;
        for script in self.library.iter() {
            project.save_one(script)?;
        }

        let mut manifest = Manifest::new(name).with_variables(&self.world.variables);
        manifest.open_scripts = self.tabs.names().map(str::to_string).collect();
        project.save_manifest(&manifest)?;

        self.project = project;
        self.world.console.info(format!(
            "Saved project '{}' ({} objects, {} scripts)",
            name,
            self.world.scene.len(),
            self.library.len()
        ));
        Ok(())
    }

    pub fn shutdown(&mut self) {
        if let Some(mut host) = self.host.take() {
            host.finalize();
        }
    }
}

fn start_host(mut host: Box<dyn ScriptHost>, world: &mut World) -> Option<Box<dyn ScriptHost>> {
    match host.init() {
        Ok(()) => Some(host),
        Err(e) => {
            world
                .console
                .error(format!("embedded scripting unavailable: {}", e));
            None
        }
    }
}
