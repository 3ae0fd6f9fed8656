//! First contact between the aimed cue ball and the object ball

use super::{PredictionError, to_pixel};
use crate::bbox::BBox;
use cueline_core::{Circle, Line, Point};
use std::collections::HashSet;

/// Discretized collision search along the aim line.
///
/// Both balls are represented by their 360 integer boundary samples; the
/// balls touch where the two sample sets share a point.
#[derive(Debug, Clone, Copy)]
pub struct CollisionSolver {
    max_scan_steps: usize,
}

impl CollisionSolver {
    pub fn new(max_scan_steps: usize) -> Self {
        Self { max_scan_steps }
    }

    /// Walk the cue ball from its center toward the object ball's x, one
    /// pixel column at a time, along the line through `contact` and the
    /// cue-ball center. Returns the centroid of the first shared boundary
    /// samples, or `None` when the line never reaches the object ball.
    pub fn solve(
        &self,
        contact: Point,
        white: &BBox,
        object: Circle,
    ) -> Result<Option<Point>, PredictionError> {
        let start = white.center();
        let aim = Line::through(contact, start);
        let white_radius = white.width.div_euclid(2);

        let end_x = object.center.x;
        let steps = (end_x as i64 - start.x as i64).unsigned_abs();
        if steps > self.max_scan_steps as u64 {
            return Err(PredictionError::ScanTooLong {
                steps,
                limit: self.max_scan_steps,
            });
        }
        let direction = if end_x >= start.x { 1 } else { -1 };

        let object_points: HashSet<Point> = object.boundary_points().into_iter().collect();

        for step in 0..steps as i32 {
            let x = start.x + step * direction;
            let y = to_pixel(aim.y_at(x as f64))?;
            let moving = Circle::new(Point::new(x, y), white_radius);

            let shared: Vec<Point> = moving
                .boundary_points()
                .into_iter()
                .filter(|p| object_points.contains(p))
                .collect();

            if let Some(impact) = Point::centroid(&shared) {
                return Ok(Some(impact));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_at(x: i32, y: i32) -> BBox {
        BBox::new(x - 10, y - 10, 20, 20, 0.9)
    }

    #[test]
    fn test_tangent_on_aim_line() -> Result<(), PredictionError> {
        let solver = CollisionSolver::new(4096);
        let object = Circle::new(Point::new(160, 100), 10);

        let impact = solver.solve(Point::new(80, 100), &white_at(100, 100), object)?;

        // True tangency point is (150, 100).
        let impact = impact.expect("aim line passes through the object ball");
        assert!(impact.distance(&Point::new(150, 100)) <= 2.0, "{:?}", impact);
        Ok(())
    }

    #[test]
    fn test_already_touching_balls() -> Result<(), PredictionError> {
        let solver = CollisionSolver::new(4096);
        let object = Circle::new(Point::new(120, 100), 10);

        let impact = solver.solve(Point::new(80, 100), &white_at(100, 100), object)?;

        let impact = impact.expect("touching balls collide on the first step");
        assert!(impact.distance(&Point::new(110, 100)) <= 2.0, "{:?}", impact);
        Ok(())
    }

    #[test]
    fn test_scanning_leftward() -> Result<(), PredictionError> {
        let solver = CollisionSolver::new(4096);
        let object = Circle::new(Point::new(40, 100), 10);

        let impact = solver.solve(Point::new(120, 100), &white_at(100, 100), object)?;

        let impact = impact.expect("aim line passes through the object ball");
        assert!(impact.distance(&Point::new(50, 100)) <= 2.0, "{:?}", impact);
        Ok(())
    }

    #[test]
    fn test_perpendicular_offset_misses() -> Result<(), PredictionError> {
        let solver = CollisionSolver::new(4096);
        // Offset 30px from the aim line, more than the summed radii of 20px.
        let object = Circle::new(Point::new(160, 130), 10);

        assert_eq!(solver.solve(Point::new(80, 100), &white_at(100, 100), object)?, None);
        Ok(())
    }

    #[test]
    fn test_near_vertical_aim_uses_unit_run() -> Result<(), PredictionError> {
        let solver = CollisionSolver::new(4096);
        // Contact directly above the white ball. The aim line is approximated
        // as slope 20 through the contact point rather than a vertical, so a
        // ball straight below is never scanned, while the line's second column
        // (101, 100) touches a ball sitting to its right.
        let below = Circle::new(Point::new(100, 160), 10);
        assert_eq!(solver.solve(Point::new(100, 80), &white_at(100, 100), below)?, None);

        let beside = Circle::new(Point::new(121, 100), 10);
        let impact = solver.solve(Point::new(100, 80), &white_at(100, 100), beside)?;
        assert_eq!(impact, Some(Point::new(111, 100)));
        Ok(())
    }

    #[test]
    fn test_scan_limit() {
        let solver = CollisionSolver::new(10);
        let object = Circle::new(Point::new(160, 100), 10);

        assert_eq!(
            solver.solve(Point::new(80, 100), &white_at(100, 100), object),
            Err(PredictionError::ScanTooLong { steps: 60, limit: 10 })
        );
    }

    #[test]
    fn test_same_column_has_nothing_to_scan() -> Result<(), PredictionError> {
        let solver = CollisionSolver::new(4096);
        let object = Circle::new(Point::new(100, 130), 10);

        assert_eq!(solver.solve(Point::new(80, 100), &white_at(100, 100), object)?, None);
        Ok(())
    }
}
