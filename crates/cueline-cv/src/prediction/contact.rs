//! Where the cue tip meets the cue ball

use crate::bbox::BBox;
use cueline_core::{Circle, Point};

/// Starting best gap of the nearest-sample search.
const INITIAL_BEST_GAP: f64 = 1_000_000.0;

/// Running estimate of the cue/white-ball contact point.
///
/// Every call contributes one sample and the estimate is the mean of all
/// samples since the last reset, so it settles more slowly the longer the
/// player aims.
#[derive(Debug, Clone, Default)]
pub struct ContactPointEstimator {
    radius_sum: i64,
    radius_count: i64,
    history: Vec<Point>,
}

impl ContactPointEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Running mean of the cue half-extent, 0 before the first sample.
    pub fn mean_radius(&self) -> i32 {
        if self.radius_count == 0 {
            return 0;
        }
        self.radius_sum.div_euclid(self.radius_count) as i32
    }

    pub fn history(&self) -> &[Point] {
        &self.history
    }

    /// Forget the contact history. The cue radius mean is kept.
    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    pub fn estimate(&mut self, cue: &BBox, white: &BBox) -> Point {
        let half_extent = (cue.width.div_euclid(2) + cue.height.div_euclid(2)).div_euclid(2);
        self.radius_sum += half_extent as i64;
        self.radius_count += 1;

        let cue_center = cue.center();
        let target = white.center();

        let mut best = (cue_center, INITIAL_BEST_GAP);
        for candidate in Circle::new(cue_center, self.mean_radius()).boundary_points() {
            let gap = candidate.distance(&target);
            if gap < best.1 {
                best = (candidate, gap);
            }
        }

        self.history.push(best.0);
        Point::centroid(&self.history).unwrap_or(best.0)
    }
}
