//! Cueline Computer Vision Library
//!
//! Table localization, ball classification and shot prediction for a
//! camera-fed pool assistant. One [`PoolTracker`] holds the state of one
//! camera/table session and is driven once per frame.

pub mod bbox;
pub mod classify;
pub mod detection;
pub mod prediction;
pub mod table;
pub mod utils;

// Re-export commonly used types
pub use bbox::BBox;
pub use classify::{BallClassifier, BallColorInfo, ClassifiedBall};
pub use detection::{
    ConfigError, DetectionClass, FrameReport, PoolTracker, PrimarySelector, RawDetection,
    TrackerConfig,
};
pub use prediction::{PredictionError, ShotPhase, ShotPrediction, ShotStabilizer};
pub use table::{HsvRange, Pocket, TableLayout, TableLocator, TableRegion};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Seams to collaborators that live outside the engine
pub mod traits {
    use super::*;
    use image::RgbImage;

    /// Object detector run on the cropped table region.
    ///
    /// Returned boxes are in ROI-local coordinates.
    pub trait ObjectDetector {
        fn detect(&self, roi: &RgbImage) -> Result<Vec<RawDetection>>;
    }
}
