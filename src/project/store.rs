use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Manifest;
use super::scene_file::{format_object, parse_object};
use crate::scene::{GameObject, Scene};
use crate::script::Script;

const SCRIPTS_DIR: &str = "scripts";
const SCENE_FILE: &str = "scene.txt";
const MANIFEST_FILE: &str = "project.json";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid name '{0}'")]
    InvalidName(String),
    #[error("{path}: invalid manifest: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ProjectError + '_ {
    move |source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Project and script names are single path components
pub fn check_name(name: &str) -> Result<(), ProjectError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(ProjectError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// A project directory: `<projects_dir>/<name>/` with a `scripts/` folder,
/// the scene file and the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    dir: PathBuf,
}

impl Project {
    pub fn new(projects_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: projects_dir.join(name),
        }
    }

    /// Like `new`, for a name typed by the user
    pub fn named(projects_dir: &Path, name: &str) -> Result<Self, ProjectError> {
        check_name(name)?;
        Ok(Self::new(projects_dir, name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.dir.join(SCRIPTS_DIR)
    }

    pub fn script_path(&self, script_name: &str) -> Result<PathBuf, ProjectError> {
        check_name(script_name)?;
        Ok(self.scripts_dir().join(script_name))
    }

    /// Create the project and scripts directories if they don't exist
    pub fn ensure(&self) -> Result<(), ProjectError> {
        let scripts = self.scripts_dir();
        fs::create_dir_all(&scripts).map_err(io_error(&scripts))
    }

    /// Read every script file, sorted by name. A missing scripts dir is empty,
    /// and files that can't be read as text are skipped.
    pub fn load_all(&self) -> Result<Vec<Script>, ProjectError> {
        let dir = self.scripts_dir();
        let read_dir = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&dir)(e)),
        };

        let mut paths: Vec<PathBuf> = read_dir
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut scripts = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(text) => scripts.push(Script::from_text(name, &text)),
                Err(e) => log::warn!("{}: skipping script: {}", path.display(), e),
            }
        }
        Ok(scripts)
    }

    pub fn read_script(&self, script_name: &str) -> Result<String, ProjectError> {
        let path = self.script_path(script_name)?;
        fs::read_to_string(&path).map_err(io_error(&path))
    }

    /// Write one script as raw lines
    pub fn save_one(&self, script: &Script) -> Result<(), ProjectError> {
        self.ensure()?;
        let path = self.script_path(&script.name)?;
        let mut text = script.text();
        text.push('\n');
        fs::write(&path, text).map_err(io_error(&path))
    }

    pub fn save_scene(&self, scene: &Scene) -> Result<(), ProjectError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.dir.join(SCENE_FILE);
        let text: String = scene
            .iter()
            .map(|obj| format_object(obj) + "\n")
            .collect();
        fs::write(&path, text).map_err(io_error(&path))
    }

    /// Objects from the scene file, or `None` if the project has no scene yet
    pub fn load_scene(&self) -> Result<Option<Vec<GameObject>>, ProjectError> {
        let path = self.dir.join(SCENE_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path)(e)),
        };

        let mut objects = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_object(line) {
                Some(obj) => objects.push(obj),
                None => log::warn!("{}:{}: skipping malformed object", path.display(), idx + 1),
            }
        }
        Ok(Some(objects))
    }

    pub fn save_manifest(&self, manifest: &Manifest) -> Result<(), ProjectError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.dir.join(MANIFEST_FILE);
        let content =
            serde_json::to_string_pretty(manifest).map_err(|source| ProjectError::Manifest {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, content).map_err(io_error(&path))
    }

    pub fn load_manifest(&self) -> Result<Option<Manifest>, ProjectError> {
        let path = self.dir.join(MANIFEST_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path)(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ProjectError::Manifest { path, source })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scene::{Rgba, Shape, Vec2};

    /// Fresh, empty directory under the system temp dir
    pub(crate) fn temp_projects_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("easel-{}-{}", std::process::id(), test));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn load_all_on_missing_dir_is_empty() {
        let root = temp_projects_dir("missing");
        let project = Project::new(&root, "Nothing");
        assert!(project.load_all().unwrap().is_empty());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn saved_scripts_load_back_sorted() {
        let root = temp_projects_dir("scripts");
        let project = Project::new(&root, "Demo");
        project
            .save_one(&Script::from_text("b.script", "x = 1\nmove box x 0"))
            .unwrap();
        project
            .save_one(&Script::from_text("a.rhai", r#"move_object("box", 1, 2);"#))
            .unwrap();

        let scripts = project.load_all().unwrap();
        let names: Vec<_> = scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a.rhai", "b.script"]);
        assert_eq!(scripts[1].lines, vec!["x = 1", "move box x 0"]);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn unreadable_script_does_not_stop_the_load() {
        let root = temp_projects_dir("binary");
        let project = Project::new(&root, "Demo");
        project.ensure().unwrap();
        fs::write(project.scripts_dir().join("good.script"), "move box 1 1\n").unwrap();
        fs::write(project.scripts_dir().join("logo.png"), [0x89, b'P', b'N', b'G', 0xff, 0xfe]).unwrap();

        let scripts = project.load_all().unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].name, "good.script");
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn names_cannot_leave_their_directory() {
        let root = temp_projects_dir("names");
        let project = Project::new(&root, "Demo");
        for bad in ["", "../../x.rhai", "a/b.script", "..", "dir\\x.script"] {
            assert!(
                matches!(project.script_path(bad), Err(ProjectError::InvalidName(_))),
                "{:?}",
                bad
            );
        }
        assert!(matches!(
            Project::named(&root, "../elsewhere"),
            Err(ProjectError::InvalidName(_))
        ));
        assert!(project.read_script("../secret").is_err());

        assert_eq!(
            project.script_path("orbit.rhai").unwrap(),
            root.join("Demo").join("scripts").join("orbit.rhai")
        );
        assert_eq!(Project::named(&root, "Other").unwrap().name(), "Other");
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn scene_round_trips_through_file() {
        let root = temp_projects_dir("scene");
        let project = Project::new(&root, "Demo");
        assert_eq!(project.load_scene().unwrap(), None);

        let mut scene = Scene::new(4);
        scene
            .add("player", Shape::Circle, Vec2::new(500.0, 300.0), 40.0, Rgba::RED)
            .unwrap();
        scene
            .add("box", Shape::Rect, Vec2::new(700.6, 350.0), 50.0, Rgba::BLUE)
            .unwrap();
        project.save_scene(&scene).unwrap();

        let objects = project.load_scene().unwrap().unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, "player");
        assert_eq!(objects[1].position, Vec2::new(700.0, 350.0));
        assert_eq!(objects[1].color, Rgba::BLUE);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn malformed_scene_lines_are_skipped() {
        let root = temp_projects_dir("malformed");
        let project = Project::new(&root, "Demo");
        fs::create_dir_all(project.dir()).unwrap();
        fs::write(
            project.dir().join(SCENE_FILE),
            "circle a 1 2 3 4 5 6\ngarbage\n\nrect b 0 0 1 0 0 0\n",
        )
        .unwrap();
        let objects = project.load_scene().unwrap().unwrap();
        assert_eq!(objects.len(), 2);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn manifest_round_trips() {
        let root = temp_projects_dir("manifest");
        let project = Project::new(&root, "Demo");
        assert_eq!(project.load_manifest().unwrap(), None);

        let mut manifest = Manifest::new("Demo");
        manifest.open_scripts.push("a.script".to_string());
        project.save_manifest(&manifest).unwrap();
        assert_eq!(project.load_manifest().unwrap(), Some(manifest));
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn broken_manifest_is_an_error() {
        let root = temp_projects_dir("broken");
        let project = Project::new(&root, "Demo");
        fs::create_dir_all(project.dir()).unwrap();
        fs::write(project.dir().join(MANIFEST_FILE), "{ nope").unwrap();
        assert!(matches!(
            project.load_manifest(),
            Err(ProjectError::Manifest { .. })
        ));
        let _ = fs::remove_dir_all(root);
    }
}
