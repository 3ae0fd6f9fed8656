//! Table region, pockets and cloth color ranges

pub mod locator;

pub use locator::TableLocator;

use cueline_core::Point;
use serde::{Deserialize, Serialize};

/// Pocket inset from the region corner along both axes.
pub const CORNER_POCKET_INSET: i32 = 52;
/// Pocket inset from the long rail for the two middle pockets.
pub const SIDE_POCKET_INSET: i32 = 40;
/// Horizontal correction applied to the middle pocket position.
pub const SIDE_POCKET_SHIFT: i32 = 12;
/// Capture radius around every pocket center.
pub const POCKET_RADIUS: i32 = 50;

/// Inclusive HSV bounds, OpenCV 8-bit convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }

    /// Bounds are ordered and hue stays within 0..=180.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| self.lower[i] <= self.upper[i]) && self.upper[0] <= 180
    }
}

impl Default for HsvRange {
    fn default() -> Self {
        Self::new([35, 40, 40], [85, 255, 255])
    }
}

/// Named cloth color presets.
pub const COLOR_PRESETS: [(&str, HsvRange); 6] = [
    ("green", HsvRange::new([35, 40, 40], [85, 255, 255])),
    ("gray", HsvRange::new([0, 0, 60], [180, 50, 200])),
    ("blue", HsvRange::new([90, 50, 50], [130, 255, 255])),
    ("pink", HsvRange::new([140, 50, 100], [170, 255, 255])),
    ("purple", HsvRange::new([125, 50, 50], [155, 255, 255])),
    ("custom", HsvRange::new([35, 40, 40], [85, 255, 255])),
];

pub fn preset_range(name: &str) -> Option<HsvRange> {
    COLOR_PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, range)| *range)
}

/// Playing-surface rectangle in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Rail lines inset from a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rails {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl TableRegion {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_xywh(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    pub fn rails(&self, inset: i32) -> Rails {
        Rails {
            left: self.x + inset,
            right: self.x + self.width - inset,
            top: self.y + inset,
            bottom: self.y + self.height - inset,
        }
    }

    /// The six pockets: four corners, then top and bottom middle.
    pub fn pockets(&self) -> [Pocket; 6] {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        let mid_x = x + (w - SIDE_POCKET_SHIFT).div_euclid(2);
        [
            Point::new(x + CORNER_POCKET_INSET, y + CORNER_POCKET_INSET),
            Point::new(x + CORNER_POCKET_INSET, y + h - CORNER_POCKET_INSET),
            Point::new(x + w - CORNER_POCKET_INSET, y + CORNER_POCKET_INSET),
            Point::new(x + w - CORNER_POCKET_INSET, y + h - CORNER_POCKET_INSET),
            Point::new(mid_x, y + SIDE_POCKET_INSET),
            Point::new(mid_x, y + h - SIDE_POCKET_INSET),
        ]
        .map(|center| Pocket::new(center, POCKET_RADIUS))
    }
}

/// Pocket capture zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pocket {
    pub center: Point,
    /// `[x1, y1, x2, y2]`
    pub bbox: [i32; 4],
}

impl Pocket {
    pub fn new(center: Point, radius: i32) -> Self {
        Self {
            center,
            bbox: [
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ],
        }
    }

    /// True when the square of half-size `half` around `point` lies
    /// entirely inside the pocket box.
    pub fn captures(&self, point: Point, half: i32) -> bool {
        let [x1, y1, x2, y2] = self.bbox;
        point.x - half >= x1 && point.y - half >= y1 && point.x + half <= x2 && point.y + half <= y2
    }
}

/// Located table with its derived pockets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub region: TableRegion,
    pub pockets: [Pocket; 6],
}

impl TableLayout {
    pub fn from_region(region: TableRegion) -> Self {
        Self {
            region,
            pockets: region.pockets(),
        }
    }

    pub fn pocket_centers(&self) -> Vec<Point> {
        self.pockets.iter().map(|p| p.center).collect()
    }
}
