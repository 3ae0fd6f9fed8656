//! Shot prediction: contact point, first collision, rail bounces and the
//! stabilizer that decides what is displayed.

pub mod collision;
pub mod contact;
pub mod rails;
pub mod stabilizer;

pub use collision::CollisionSolver;
pub use contact::ContactPointEstimator;
pub use rails::{RailReflector, ReflectedPath};
pub use stabilizer::{PhaseTransition, ShotPhase, ShotStabilizer};

use crate::bbox::BBox;
use crate::classify::ClassifiedBall;
use crate::table::TableLayout;
use cueline_core::geometry::pixel;
use cueline_core::{BallColor, BallStyle, Point};
use serde::Serialize;
use thiserror::Error;

/// Arithmetic faults inside the prediction pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("coordinate {value} is not representable as a pixel")]
    OutOfRange { value: f64 },
    #[error("collision scan of {steps} steps exceeds the limit of {limit}")]
    ScanTooLong { steps: u64, limit: usize },
}

pub(crate) fn to_pixel(value: f64) -> Result<i32, PredictionError> {
    pixel(value).ok_or(PredictionError::OutOfRange { value })
}

/// Predicted outcome of the current aim.
///
/// Compared by value so that identical predictions from different frames
/// vote together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShotPrediction {
    pub impact_point: Point,
    /// Starts at the object-ball center, then one point per rail bounce.
    pub path: Vec<Point>,
    pub will_pocket: bool,
    pub target_color: BallColor,
    pub target_style: BallStyle,
    pub target_number: Option<u8>,
}

/// Contact estimation, collision and rail reflection for one session
#[derive(Debug, Clone)]
pub struct ShotPredictor {
    contact: ContactPointEstimator,
    collision: CollisionSolver,
    rails: RailReflector,
}

impl ShotPredictor {
    pub fn new(max_bounces: usize, max_scan_steps: usize) -> Self {
        Self {
            contact: ContactPointEstimator::new(),
            collision: CollisionSolver::new(max_scan_steps),
            rails: RailReflector::new(max_bounces),
        }
    }

    pub fn reset_contact_history(&mut self) {
        self.contact.reset_history();
    }

    /// `Ok(None)` when the aim line misses the object ball.
    pub fn predict(
        &mut self,
        cue: &BBox,
        white: &BBox,
        object: &ClassifiedBall,
        layout: &TableLayout,
    ) -> Result<Option<ShotPrediction>, PredictionError> {
        let contact = self.contact.estimate(cue, white);

        let Some(impact) = self.collision.solve(contact, white, object.circle())? else {
            return Ok(None);
        };

        let reflected = self.rails.reflect(impact, object.bbox.center(), layout)?;

        Ok(Some(ShotPrediction {
            impact_point: impact,
            path: reflected.path,
            will_pocket: reflected.will_pocket,
            target_color: object.info.label,
            target_style: object.info.style,
            target_number: object.number,
        }))
    }
}
