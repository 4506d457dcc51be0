//! Plain-text scene format, one object per line:
//!
//! ```text
//! circle player 500 300 40 230 41 55
//! rect box 700 350 50 0 121 241
//! ```
//!
//! Position and size are written as integers (truncated).

use crate::scene::{GameObject, Rgba, Shape, Vec2};

pub fn format_object(obj: &GameObject) -> String {
    format!(
        "{} {} {} {} {} {} {} {}",
        obj.shape.keyword(),
        obj.name,
        obj.position.x as i64,
        obj.position.y as i64,
        obj.size as i64,
        obj.color.r,
        obj.color.g,
        obj.color.b
    )
}

/// Parse one scene line; `None` for blank or malformed lines
pub fn parse_object(line: &str) -> Option<GameObject> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [shape, name, x, y, size, r, g, b] = fields[..] else {
        return None;
    };

    let shape = Shape::from_keyword(shape)?;
    let x: f32 = x.parse().ok()?;
    let y: f32 = y.parse().ok()?;
    let size: f32 = size.parse().ok()?;
    let r: f32 = r.parse().ok()?;
    let g: f32 = g.parse().ok()?;
    let b: f32 = b.parse().ok()?;

    Some(GameObject::new(
        name,
        shape,
        Vec2::new(x, y),
        size,
        Rgba::from_channels(r, g, b),
    ))
}
