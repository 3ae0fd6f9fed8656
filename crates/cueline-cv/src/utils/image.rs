//! Image loading, cropping and HSV conversion

use crate::Result;
use anyhow::Context;
use image::{Rgb, RgbImage, imageops};
use std::path::Path;

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Load image as an RGB frame
    pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?;
        Ok(img.to_rgb8())
    }

    /// Crop clamped to the image bounds. `None` when nothing is left.
    pub fn safe_crop(img: &RgbImage, x: i32, y: i32, w: i32, h: i32) -> Option<RgbImage> {
        let (width, height) = (img.width() as i64, img.height() as i64);
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + w as i64).min(width);
        let y1 = (y as i64 + h as i64).min(height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        let view = imageops::crop_imm(
            img,
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        );
        Some(view.to_image())
    }

    /// Convert one RGB pixel to 8-bit HSV
    pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> [u8; 3] {
        let [r, g, b] = pixel.0.map(|c| c as f64);
        let v = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = v - min;

        let s = if v == 0.0 { 0.0 } else { 255.0 * diff / v };

        let h = if diff == 0.0 {
            0.0
        } else {
            let degrees = if v == r {
                60.0 * (g - b) / diff
            } else if v == g {
                120.0 + 60.0 * (b - r) / diff
            } else {
                240.0 + 60.0 * (r - g) / diff
            };
            if degrees < 0.0 { degrees + 360.0 } else { degrees }
        };

        [
            (h / 2.0).round().min(180.0) as u8,
            s.round() as u8,
            v as u8,
        ]
    }
}
