//! Axis-aligned detection boxes in frame coordinates.

use cueline_core::Point;
use serde::{Deserialize, Serialize};

/// Bounding box of one detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl BBox {
    /// Create a new bounding box
    pub fn new(x: i32, y: i32, width: i32, height: i32, confidence: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Create from corner coordinates `(x1, y1, x2, y2)`
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32, confidence: f64) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1, confidence)
    }

    /// Translate by an offset, e.g. from ROI-local to frame coordinates
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Center point, halves floored
    pub fn center(&self) -> Point {
        Point::new(
            self.x + self.width.div_euclid(2),
            self.y + self.height.div_euclid(2),
        )
    }

    /// Radius of the inscribed circle, at least 1px
    pub fn inscribed_radius(&self) -> i32 {
        self.width.min(self.height).div_euclid(2).max(1)
    }

    /// `[x, y, w, h]`
    pub fn to_xywh(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}
