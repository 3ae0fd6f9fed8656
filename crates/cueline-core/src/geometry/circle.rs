use super::point::Point;

/// One boundary sample per integer degree.
pub const SAMPLES_PER_CIRCLE: usize = 360;

const AXIS_SNAP: f64 = 1e-15;

/// `(sin, cos)` of an angle in degrees, with values below 1e-15 in
/// magnitude snapped to exactly zero.
pub fn angle_components(degrees: f64) -> (f64, f64) {
    let theta = degrees.to_radians();
    let mut sin = theta.sin();
    let mut cos = theta.cos();
    if sin.abs() < AXIS_SNAP {
        sin = 0.0;
    }
    if cos.abs() < AXIS_SNAP {
        cos = 0.0;
    }
    (sin, cos)
}

/// Circle with an integer center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
}

impl Circle {
    pub fn new(center: Point, radius: i32) -> Self {
        Self { center, radius }
    }

    /// Boundary points at every integer degree, offsets truncated toward
    /// the center. Consecutive samples repeat on small radii.
    pub fn boundary_points(&self) -> Vec<Point> {
        let r = self.radius as f64;
        (0..SAMPLES_PER_CIRCLE)
            .map(|deg| {
                let (sin, cos) = angle_components(deg as f64);
                self.center.offset((cos * r) as i32, (sin * r) as i32)
            })
            .collect()
    }
}
