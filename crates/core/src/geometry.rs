use serde::{Deserialize, Serialize};

/// A point in image pixel coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral reported by the recognizer for one text fragment,
/// corners clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub corners: [Point; 4],
}

impl BoundingBox {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned convenience constructor.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            corners: [
                Point::new(left, top),
                Point::new(right, top),
                Point::new(right, bottom),
                Point::new(left, bottom),
            ],
        }
    }

    pub fn top(&self) -> f32 {
        self.corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min)
    }

    pub fn bottom(&self) -> f32 {
        self.corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn left(&self) -> f32 {
        self.corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min)
    }

    pub fn right(&self) -> f32 {
        self.corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn width(&self) -> f32 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f32 {
        self.bottom() - self.top()
    }

    /// Midpoint of the vertical extent — the line-membership key.
    pub fn vertical_center(&self) -> f32 {
        (self.top() + self.bottom()) / 2.0
    }

    /// A box with non-finite coordinates or non-positive extent cannot anchor
    /// spatial search.
    pub fn is_degenerate(&self) -> bool {
        if self.corners.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return true;
        }
        self.width() <= 0.0 || self.height() <= 0.0
    }
}
