//! Integer pixel geometry for shot prediction.

pub mod circle;
pub mod line;
pub mod point;

pub use circle::{Circle, SAMPLES_PER_CIRCLE, angle_components};
pub use line::Line;
pub use point::Point;

/// Truncate a real coordinate toward zero into the pixel range.
///
/// Returns `None` for non-finite values and values outside `i32`.
pub fn pixel(value: f64) -> Option<i32> {
    if value.is_finite() && value > i32::MIN as f64 - 1.0 && value < i32::MAX as f64 + 1.0 {
        Some(value as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_truncates_toward_zero() {
        assert_eq!(pixel(12.9), Some(12));
        assert_eq!(pixel(-12.9), Some(-12));
        assert_eq!(pixel(f64::NAN), None);
        assert_eq!(pixel(f64::INFINITY), None);
        assert_eq!(pixel(1e12), None);
    }
}
