//! HSV heuristics for ball color and stripe detection

use super::BallColorInfo;
use crate::bbox::BBox;
use crate::utils::ImageUtils;
use cueline_core::{BallColor, BallStyle};
use image::RgbImage;

/// Circular mask radius as a fraction of the crop's shorter side.
const MASK_RADIUS_RATIO: f64 = 0.48;

const VALID_V_MIN: u8 = 30;
const VALID_V_MAX: u8 = 250;
const WHITE_S_MAX: u8 = 40;
const WHITE_V_MIN: u8 = 180;
const BLACK_V_MAX: u8 = 50;

const MIN_VALID_PIXELS: usize = 50;
const MIN_CORE_PIXELS: usize = 30;

const CUE_WHITE_RATIO: f64 = 0.70;
const CUE_COLOR_RATIO: f64 = 0.10;
const EIGHT_BLACK_RATIO: f64 = 0.60;
const FALLBACK_RATIO: f64 = 0.4;
const STRIPE_WHITE_RATIO: f64 = 0.35;
const STRIPE_COLOR_RATIO: f64 = 0.15;

/// Below this median value a 10..25 hue reads as brown rather than orange.
const BROWN_MEDIAN_V: f64 = 140.0;

/// Heuristic ball classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct BallClassifier;

impl BallClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the ball inside `bbox` of `image` (same coordinate space).
    pub fn classify_region(&self, image: &RgbImage, bbox: &BBox) -> BallColorInfo {
        match ImageUtils::safe_crop(image, bbox.x, bbox.y, bbox.width, bbox.height) {
            Some(crop) => self.classify(&crop),
            None => BallColorInfo::unknown(),
        }
    }

    /// Classify a crop centered on one ball
    pub fn classify(&self, crop: &RgbImage) -> BallColorInfo {
        let (w, h) = (crop.width() as i64, crop.height() as i64);
        let r = (MASK_RADIUS_RATIO * w.min(h) as f64) as i64;
        let (cx, cy) = (w / 2, h / 2);

        let mut valid = 0usize;
        let mut white = 0usize;
        let mut black = 0usize;
        // (hue, saturation, value) of every color-core pixel
        let mut core: Vec<[u8; 3]> = Vec::new();

        for (x, y, pixel) in crop.enumerate_pixels() {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let hsv = ImageUtils::rgb_to_hsv(pixel);
            let [_, s, v] = hsv;
            if v <= VALID_V_MIN || v >= VALID_V_MAX {
                continue;
            }

            valid += 1;
            if s < WHITE_S_MAX && v > WHITE_V_MIN {
                white += 1;
            } else if v < BLACK_V_MAX {
                black += 1;
            } else {
                core.push(hsv);
            }
        }

        if valid < MIN_VALID_PIXELS {
            return BallColorInfo::unknown();
        }

        let white_ratio = white as f64 / valid as f64;
        let black_ratio = black as f64 / valid as f64;
        let color_ratio = core.len() as f64 / valid as f64;
        let info = |label, style, hue| BallColorInfo {
            label,
            style,
            hue,
            white_ratio,
            black_ratio,
        };

        if white_ratio > CUE_WHITE_RATIO && color_ratio < CUE_COLOR_RATIO {
            return info(BallColor::White, BallStyle::Cue, None);
        }
        if black_ratio > EIGHT_BLACK_RATIO {
            return info(BallColor::Black, BallStyle::Solid, None);
        }
        if core.len() < MIN_CORE_PIXELS {
            return if white_ratio > FALLBACK_RATIO {
                info(BallColor::White, BallStyle::Cue, None)
            } else if black_ratio > FALLBACK_RATIO {
                info(BallColor::Black, BallStyle::Solid, None)
            } else {
                info(BallColor::Unknown, BallStyle::Unknown, None)
            };
        }

        let hue = weighted_hue(&core);
        let label = hue_to_color(hue, median_value(&core));
        let style = if white_ratio > STRIPE_WHITE_RATIO
            && color_ratio > STRIPE_COLOR_RATIO
            && label.is_numbered_pair()
        {
            BallStyle::Stripe
        } else {
            BallStyle::Solid
        };

        info(label, style, Some(hue))
    }
}

/// Mean hue weighted by S*V, so pale and dark pixels barely count.
fn weighted_hue(core: &[[u8; 3]]) -> f64 {
    let (sum, weights) = core.iter().fold((0.0, 0.0), |(sum, weights), &[h, s, v]| {
        let wgt = (s as f64 / 255.0) * (v as f64 / 255.0) + 1e-6;
        (sum + h as f64 * wgt, weights + wgt)
    });
    sum / weights
}

fn median_value(core: &[[u8; 3]]) -> f64 {
    let mut values: Vec<u8> = core.iter().map(|&[_, _, v]| v).collect();
    values.sort_unstable();
    let mid = values.len() / 2;
    match values.len() {
        0 => 0.0,
        n if n % 2 == 1 => values[mid] as f64,
        _ => (values[mid - 1] as f64 + values[mid] as f64) / 2.0,
    }
}

/// Map an OpenCV hue (0..=180) to a ball color. Red wraps around 0/180.
pub fn hue_to_color(hue: f64, median_v: f64) -> BallColor {
    match hue {
        h if !(0.0..=180.0).contains(&h) => BallColor::Unknown,
        h if h <= 10.0 || h >= 160.0 => BallColor::Red,
        h if h <= 25.0 => {
            if median_v < BROWN_MEDIAN_V {
                BallColor::Brown
            } else {
                BallColor::Orange
            }
        }
        h if h <= 40.0 => BallColor::Yellow,
        h if h <= 80.0 => BallColor::Green,
        h if h <= 130.0 => BallColor::Blue,
        h if h <= 155.0 => BallColor::Purple,
        _ => BallColor::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const YELLOW: Rgb<u8> = Rgb([240, 240, 0]);
    const WHITE: Rgb<u8> = Rgb([230, 230, 230]);

    #[test]
    fn test_saturated_yellow_is_solid_one() {
        let crop = RgbImage::from_pixel(40, 40, YELLOW);
        let info = BallClassifier::new().classify(&crop);

        assert_eq!(info.label, BallColor::Yellow);
        assert_eq!(info.style, BallStyle::Solid);
        assert_eq!(info.number(), Some(1));
        assert_eq!(info.hue.map(f64::round), Some(30.0));
        assert_eq!(info.white_ratio, 0.0);
    }

    #[test]
    fn test_white_band_makes_a_stripe() {
        // Yellow band across the middle, white caps above and below.
        let crop = RgbImage::from_fn(40, 40, |_, y| if (14..26).contains(&y) { YELLOW } else { WHITE });
        let info = BallClassifier::new().classify(&crop);

        assert_eq!(info.label, BallColor::Yellow);
        assert!(info.white_ratio > 0.35);
        assert_eq!(info.style, BallStyle::Stripe);
        assert_eq!(info.number(), Some(9));
    }

    #[test]
    fn test_cue_ball() {
        let crop = RgbImage::from_pixel(30, 30, WHITE);
        let info = BallClassifier::new().classify(&crop);
        assert_eq!(info.label, BallColor::White);
        assert_eq!(info.style, BallStyle::Cue);
        assert_eq!(info.number(), Some(0));
    }

    #[test]
    fn test_eight_ball() {
        let crop = RgbImage::from_pixel(30, 30, Rgb([40, 40, 40]));
        let info = BallClassifier::new().classify(&crop);
        assert_eq!(info.label, BallColor::Black);
        assert_eq!(info.style, BallStyle::Solid);
        assert_eq!(info.number(), Some(8));
    }

    #[test]
    fn test_too_few_valid_pixels_is_unknown() {
        // Pure black and blown-out white are both outside the valid value band.
        let dark = RgbImage::from_pixel(30, 30, Rgb([0, 0, 0]));
        let bright = RgbImage::from_pixel(30, 30, Rgb([255, 255, 255]));
        let tiny = RgbImage::from_pixel(6, 6, YELLOW);

        for crop in [dark, bright, tiny] {
            let info = BallClassifier::new().classify(&crop);
            assert_eq!(info.label, BallColor::Unknown);
            assert_eq!(info.style, BallStyle::Unknown);
            assert_eq!(info.hue, None);
        }
    }

    #[test]
    fn test_hue_bands() {
        assert_eq!(hue_to_color(0.0, 200.0), BallColor::Red);
        assert_eq!(hue_to_color(175.0, 200.0), BallColor::Red);
        assert_eq!(hue_to_color(157.0, 200.0), BallColor::Red);
        assert_eq!(hue_to_color(18.0, 200.0), BallColor::Orange);
        assert_eq!(hue_to_color(18.0, 100.0), BallColor::Brown);
        assert_eq!(hue_to_color(30.0, 200.0), BallColor::Yellow);
        assert_eq!(hue_to_color(60.0, 200.0), BallColor::Green);
        assert_eq!(hue_to_color(110.0, 200.0), BallColor::Blue);
        assert_eq!(hue_to_color(140.0, 200.0), BallColor::Purple);
        assert_eq!(hue_to_color(181.0, 200.0), BallColor::Unknown);
    }

    #[test]
    fn test_region_outside_image_is_unknown() {
        let image = RgbImage::from_pixel(50, 50, YELLOW);
        let info = BallClassifier::new().classify_region(&image, &BBox::new(60, 60, 10, 10, 0.9));
        assert_eq!(info, BallColorInfo::unknown());
    }

    #[test]
    fn test_median_value() {
        assert_eq!(median_value(&[[0, 0, 10], [0, 0, 30], [0, 0, 20]]), 20.0);
        assert_eq!(median_value(&[[0, 0, 10], [0, 0, 31]]), 20.5);
    }
}
