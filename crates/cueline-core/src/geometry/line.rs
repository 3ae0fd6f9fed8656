use super::point::Point;

/// Non-vertical line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Line through two points.
    ///
    /// Vertical pairs are not special-cased: when both x coordinates are
    /// equal the run is taken as 1, so the result is a steep line one pixel
    /// off vertical rather than a true vertical.
    pub fn through(p1: Point, p2: Point) -> Self {
        let rise = (p2.y - p1.y) as f64;
        let run = match p2.x - p1.x {
            0 => 1.0,
            dx => dx as f64,
        };
        let slope = rise / run;
        Self::new(slope, p1.y as f64 - slope * p1.x as f64)
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Inverse of [`Line::y_at`]. Not meaningful for a horizontal line.
    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }

    /// Mirror the direction across a vertical or horizontal rail, keeping
    /// the line anchored at `pivot`.
    pub fn mirrored_at(&self, pivot: Point) -> Self {
        let slope = -self.slope;
        Self::new(slope, pivot.y as f64 - slope * pivot.x as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_through_points() {
        let line = Line::through(Point::new(0, 1), Point::new(2, 5));
        assert_eq!(line.slope, 2.0);
        assert_eq!(line.intercept, 1.0);
        assert_eq!(line.y_at(3.0), 7.0);
        assert_eq!(line.x_at(7.0), 3.0);
    }

    #[test]
    fn test_coincident_x_uses_unit_run() {
        // Approximation: the run is offset to 1 instead of producing a vertical line.
        let line = Line::through(Point::new(100, 80), Point::new(100, 100));
        assert_eq!(line.slope, 20.0);
        assert_eq!(line.intercept, 80.0 - 20.0 * 100.0);
        assert!(line.slope.is_finite());
    }

    #[test]
    fn test_mirror_keeps_pivot() {
        let line = Line::new(1.5, 2.0);
        let pivot = Point::new(4, 8);
        let mirrored = line.mirrored_at(pivot);
        assert_eq!(mirrored.slope, -1.5);
        assert_eq!(mirrored.y_at(4.0), 8.0);
    }
}
