//! Object-ball path through rail bounces

use super::{PredictionError, to_pixel};
use crate::table::TableLayout;
use cueline_core::{Line, Point};

/// Rail distance from the table region edges.
pub const RAIL_INSET: i32 = 40;
/// Half-size of the ball box tested against pocket boxes.
pub const POCKET_TEST_HALF: i32 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedPath {
    pub path: Vec<Point>,
    pub will_pocket: bool,
}

/// Mirror-reflection path tracer. No energy loss, no spin.
#[derive(Debug, Clone, Copy)]
pub struct RailReflector {
    max_bounces: usize,
}

impl RailReflector {
    pub fn new(max_bounces: usize) -> Self {
        Self { max_bounces }
    }

    /// Trace the object ball from its center along the line through the
    /// impact point, bouncing off the rails until a bounce lands in a
    /// pocket or the bounce budget runs out.
    pub fn reflect(
        &self,
        impact: Point,
        object_center: Point,
        layout: &TableLayout,
    ) -> Result<ReflectedPath, PredictionError> {
        let rails = layout.region.rails(RAIL_INSET);
        let mut line = Line::through(impact, object_center);
        let mut path = vec![object_center];

        // Struck from the right, the ball heads for the left rail first.
        let mut target_x = if impact.x > object_center.x {
            rails.left
        } else {
            rails.right
        };

        for _ in 0..self.max_bounces {
            let mut x = target_x;
            let mut y = to_pixel(line.y_at(x as f64))?;

            if y >= rails.bottom {
                y = rails.bottom;
                if line.slope != 0.0 {
                    x = to_pixel(line.x_at(y as f64))?;
                }
            }
            if y <= rails.top {
                y = rails.top;
                if line.slope != 0.0 {
                    x = to_pixel(line.x_at(y as f64))?;
                }
            }
            if x >= rails.right {
                x = rails.right;
                y = to_pixel(line.y_at(x as f64))?;
                target_x = rails.left;
            }
            if x <= rails.left {
                x = rails.left;
                y = to_pixel(line.y_at(x as f64))?;
                target_x = rails.right;
            }

            let bounce = Point::new(x, y);
            path.push(bounce);

            if layout
                .pockets
                .iter()
                .any(|pocket| pocket.captures(bounce, POCKET_TEST_HALF))
            {
                return Ok(ReflectedPath {
                    path,
                    will_pocket: true,
                });
            }

            line = line.mirrored_at(bounce);
        }

        Ok(ReflectedPath {
            path,
            will_pocket: false,
        })
    }
}
