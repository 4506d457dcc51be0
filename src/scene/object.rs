use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A point or offset on the canvas, in world units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Fill color of a game object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque color from numeric channels, clamped to 0..=255
    pub fn from_channels(r: f32, g: f32, b: f32) -> Self {
        // float-to-int `as` saturates and maps NaN to 0
        Self::opaque(r as u8, g as u8, b as u8)
    }

    pub const RED: Rgba = Rgba::opaque(230, 41, 55);
    pub const BLUE: Rgba = Rgba::opaque(0, 121, 241);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(255, 255, 255)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Rect,
}

impl Shape {
    /// Keyword used in scene files and log lines
    pub fn keyword(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Rect => "rect",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "circle" => Some(Shape::Circle),
            "rect" => Some(Shape::Rect),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A shape placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub name: String,
    pub shape: Shape,
    pub position: Vec2,
    /// Radius for circles, half-extent for rects
    pub size: f32,
    pub color: Rgba,
    pub selected: bool,
}

impl GameObject {
    pub fn new(name: impl Into<String>, shape: Shape, position: Vec2, size: f32, color: Rgba) -> Self {
        Self {
            name: name.into(),
            shape,
            position,
            // f32::max ignores NaN, so a NaN size also ends up as 1
            size: size.max(1.0),
            color,
            selected: false,
        }
    }

    /// Whether `point` lies on or inside the object's outline
    pub fn contains(&self, point: Vec2) -> bool {
        match self.shape {
            Shape::Circle => point.distance(self.position) <= self.size,
            Shape::Rect => {
                let min = Vec2::new(self.position.x - self.size, self.position.y - self.size);
                let max = Vec2::new(self.position.x + self.size, self.position.y + self.size);
                point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
            }
        }
    }
}
