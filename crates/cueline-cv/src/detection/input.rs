//! Detector output as it arrives at the engine boundary

use crate::bbox::BBox;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest coordinate magnitude accepted from the detector.
pub const MAX_COORDINATE: f64 = (1 << 20) as f64;

/// Object classes the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionClass {
    WhiteBall,
    ColorBall,
    Cue,
}

impl DetectionClass {
    pub fn label(&self) -> &'static str {
        match self {
            DetectionClass::WhiteBall => "white-ball",
            DetectionClass::ColorBall => "color-ball",
            DetectionClass::Cue => "cue",
        }
    }
}

impl FromStr for DetectionClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "white-ball" => Ok(DetectionClass::WhiteBall),
            "color-ball" => Ok(DetectionClass::ColorBall),
            "cue" => Ok(DetectionClass::Cue),
            other => anyhow::bail!("Unrecognized detection class: '{}'", other),
        }
    }
}

/// One labeled box from the external detector, ROI-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub class: String,
    /// `[x1, y1, x2, y2]`
    pub bbox: [f64; 4],
    pub confidence: f64,
}

impl RawDetection {
    pub fn new(class: DetectionClass, bbox: [f64; 4], confidence: f64) -> Self {
        Self {
            class: class.label().to_string(),
            bbox,
            confidence,
        }
    }

    /// Parse the class label; `None` for labels the engine does not track.
    pub fn class(&self) -> Option<DetectionClass> {
        self.class.parse().ok()
    }

    /// Integer box, corners truncated. `None` when a corner is not finite
    /// or lies beyond [`MAX_COORDINATE`].
    pub fn to_bbox(&self) -> Option<BBox> {
        if !self
            .bbox
            .iter()
            .all(|v| v.is_finite() && v.abs() <= MAX_COORDINATE)
        {
            return None;
        }
        let [x1, y1, x2, y2] = self.bbox.map(|v| v as i32);
        Some(BBox::from_corners(x1, y1, x2, y2, self.confidence))
    }
}
