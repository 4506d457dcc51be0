//! Scene model - the objects placed on the canvas

mod object;
mod scene;

pub use object::{GameObject, Rgba, Shape, Vec2};
pub use scene::{Scene, SceneError};
