//! Cueline core types
//!
//! Image-free vocabulary shared by the tracking engine: ball identities and
//! the integer pixel geometry used by shot prediction.

pub mod balls;
pub mod geometry;

pub use balls::{BallColor, BallIdentity, BallStyle};
pub use geometry::{Circle, Line, Point};
