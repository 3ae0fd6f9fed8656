//! Per-frame detection handling and the session tracker

pub mod config;
pub mod input;
pub mod report;
pub mod selection;
pub mod tracker;

pub use config::{ConfigError, TrackerConfig};
pub use input::{DetectionClass, RawDetection};
pub use report::{BallReport, FrameReport, FrameStatus, PredictionReport};
pub use selection::{PrimarySelector, Selection};
pub use tracker::PoolTracker;
