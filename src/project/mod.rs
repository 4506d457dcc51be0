//! Project persistence: scripts, scene and manifest on disk

mod manifest;
mod scene_file;
mod store;

pub use manifest::Manifest;
pub use store::{Project, ProjectError, check_name};

#[cfg(test)]
pub(crate) use store::tests::temp_projects_dir;
