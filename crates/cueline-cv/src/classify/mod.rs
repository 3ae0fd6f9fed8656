//! Per-ball color, style and number classification

pub mod classifier;

pub use classifier::BallClassifier;

use crate::bbox::BBox;
use cueline_core::{BallColor, BallIdentity, BallStyle, Circle};
use serde::Serialize;

/// Classifier output for one ball crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct BallColorInfo {
    pub label: BallColor,
    pub style: BallStyle,
    /// Weighted mean hue of the color core, when one was measured.
    pub hue: Option<f64>,
    pub white_ratio: f64,
    pub black_ratio: f64,
}

impl BallColorInfo {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> BallIdentity {
        BallIdentity::new(self.label, self.style, self.white_ratio)
    }

    pub fn number(&self) -> Option<u8> {
        self.identity().number()
    }
}

/// Color-ball detection with its classification, in frame coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedBall {
    pub bbox: BBox,
    pub radius: i32,
    pub info: BallColorInfo,
    pub number: Option<u8>,
}

impl ClassifiedBall {
    pub fn new(bbox: BBox, info: BallColorInfo) -> Self {
        Self {
            bbox,
            radius: bbox.inscribed_radius(),
            number: info.number(),
            info,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.bbox.center(), self.radius)
    }
}
