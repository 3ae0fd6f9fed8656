//! Cloth-color table localization

use super::{HsvRange, TableLayout, TableRegion};
use crate::utils::ImageUtils;
use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::find_contours;
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use imageproc::point::Point as ContourPoint;
use tracing::{debug, info, warn};

/// Margin kept around the frame when no table is found.
pub const FALLBACK_MARGIN: i32 = 50;

/// Radius of the square opening kernel (5x5).
const OPENING_RADIUS: u8 = 2;

/// Finds the playing surface and caches it until invalidated
#[derive(Debug, Clone)]
pub struct TableLocator {
    range: HsvRange,
    min_area: f64,
    cached: Option<TableLayout>,
}

impl TableLocator {
    pub fn new(range: HsvRange, min_area: f64) -> Self {
        Self {
            range,
            min_area,
            cached: None,
        }
    }

    /// Change the cloth range; forces re-detection on the next frame.
    pub fn set_range(&mut self, range: HsvRange) {
        self.range = range;
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn cached(&self) -> Option<&TableLayout> {
        self.cached.as_ref()
    }

    /// Cached layout, detecting it first if needed.
    pub fn locate(&mut self, frame: &RgbImage) -> &TableLayout {
        if self.cached.is_none() {
            self.detect(frame);
        }
        self.cached.get_or_insert_with(|| fallback_layout(frame))
    }

    /// Run detection on `frame` and cache the result. Never fails: without
    /// a qualifying contour the inset full frame is used.
    pub fn detect(&mut self, frame: &RgbImage) -> TableLayout {
        let layout = match self.find_table_region(frame) {
            Some(region) => {
                info!(
                    "Table detected: x={}, y={}, w={}, h={}",
                    region.x, region.y, region.width, region.height
                );
                TableLayout::from_region(region)
            }
            None => {
                let layout = fallback_layout(frame);
                warn!(
                    "No table-colored region found, using inset frame {:?}",
                    layout.region.to_xywh()
                );
                layout
            }
        };

        self.cached = Some(layout.clone());
        layout
    }

    fn find_table_region(&self, frame: &RgbImage) -> Option<TableRegion> {
        let mask = self.cloth_mask(frame);

        if tracing::enabled!(tracing::Level::DEBUG) {
            let total = (mask.width() as usize * mask.height() as usize).max(1);
            let on = mask.pixels().filter(|p| p.0[0] > 0).count();
            debug!(
                "Cloth pixels: {} / {} ({:.2}%)",
                on,
                total,
                on as f64 * 100.0 / total as f64
            );
        }

        let opened = morphology::open(&mask, Norm::LInf, OPENING_RADIUS);
        let contours = find_contours::<i32>(&opened);
        debug!("Found {} contours", contours.len());

        let mut areas = Vec::with_capacity(contours.len());
        let mut best: Option<(f64, TableRegion)> = None;

        for contour in &contours {
            let area = contour_area(&contour.points);
            areas.push(area);
            if area > self.min_area && best.as_ref().is_none_or(|(max, _)| area > *max) {
                best = bounding_region(&contour.points).map(|region| (area, region));
            }
        }

        if !areas.is_empty() {
            areas.sort_by(|a, b| b.total_cmp(a));
            areas.truncate(3);
            debug!("Top contour areas: {:?}, min required: {}", areas, self.min_area);
        }

        best.map(|(_, region)| region)
    }

    fn cloth_mask(&self, frame: &RgbImage) -> GrayImage {
        GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
            let hsv = ImageUtils::rgb_to_hsv(frame.get_pixel(x, y));
            Luma([if self.range.contains(hsv) { 255 } else { 0 }])
        })
    }
}

/// Full frame minus the margin, shrinking the margin on tiny frames so the
/// region is never empty.
pub fn fallback_region(width: u32, height: u32) -> TableRegion {
    let inset = |extent: u32| {
        let extent = extent.min(i32::MAX as u32) as i32;
        let margin = FALLBACK_MARGIN.min((extent - 1).max(0) / 2);
        (margin, (extent - 2 * margin).max(1))
    };
    let (x, w) = inset(width);
    let (y, h) = inset(height);
    TableRegion::new(x, y, w, h)
}

fn fallback_layout(frame: &RgbImage) -> TableLayout {
    TableLayout::from_region(fallback_region(frame.width(), frame.height()))
}

/// Shoelace area of a closed contour.
fn contour_area(points: &[ContourPoint<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    (twice as f64 / 2.0).abs()
}

fn bounding_region(points: &[ContourPoint<i32>]) -> Option<TableRegion> {
    let min_x = points.iter().map(|p| p.x).min()?;
    let max_x = points.iter().map(|p| p.x).max()?;
    let min_y = points.iter().map(|p| p.y).min()?;
    let max_y = points.iter().map(|p| p.y).max()?;
    Some(TableRegion::new(
        min_x,
        min_y,
        max_x - min_x + 1,
        max_y - min_y + 1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const CLOTH: Rgb<u8> = Rgb([0, 150, 0]);

    fn frame_with_table(width: u32, height: u32, table: (u32, u32, u32, u32)) -> RgbImage {
        let (tx, ty, tw, th) = table;
        RgbImage::from_fn(width, height, |x, y| {
            if x >= tx && x < tx + tw && y >= ty && y < ty + th {
                CLOTH
            } else {
                Rgb([20, 20, 20])
            }
        })
    }

    #[test]
    fn test_detects_cloth_rectangle() {
        let frame = frame_with_table(640, 480, (60, 40, 500, 380));
        let mut locator = TableLocator::new(HsvRange::default(), 50_000.0);

        let layout = locator.detect(&frame);
        assert_eq!(layout.region, TableRegion::new(60, 40, 500, 380));
        assert_eq!(layout.pockets.len(), 6);
        assert_eq!(locator.cached(), Some(&layout));
    }

    #[test]
    fn test_small_blobs_fall_back_to_inset_frame() {
        let frame = frame_with_table(640, 480, (10, 10, 100, 100));
        let mut locator = TableLocator::new(HsvRange::default(), 50_000.0);

        let layout = locator.detect(&frame);
        assert_eq!(layout.region, TableRegion::new(50, 50, 540, 380));
    }

    #[test]
    fn test_any_frame_yields_region_and_six_pockets() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(w, h) in &[(320u32, 240u32), (64, 48), (101, 3), (1, 1)] {
            let frame = RgbImage::from_fn(w, h, |_, _| Rgb([rng.r#gen(), rng.r#gen(), rng.r#gen()]));
            let mut locator = TableLocator::new(HsvRange::default(), 1_000.0);
            let layout = locator.detect(&frame);
            assert!(layout.region.width > 0, "{}x{}", w, h);
            assert!(layout.region.height > 0, "{}x{}", w, h);
            assert_eq!(layout.pockets.len(), 6);
        }
    }

    #[test]
    fn test_locate_caches_until_invalidated() {
        let table = frame_with_table(640, 480, (60, 40, 500, 380));
        let blank = RgbImage::from_pixel(640, 480, Rgb([20, 20, 20]));
        let mut locator = TableLocator::new(HsvRange::default(), 50_000.0);

        let first = locator.locate(&table).clone();
        assert_eq!(locator.locate(&blank), &first);

        locator.set_range(HsvRange::new([90, 50, 50], [130, 255, 255]));
        assert!(locator.cached().is_none());
        assert_eq!(locator.locate(&table).region, fallback_region(640, 480));
    }

    #[test]
    fn test_fallback_region_shrinks_margin() {
        assert_eq!(fallback_region(1920, 1080), TableRegion::new(50, 50, 1820, 980));
        assert_eq!(fallback_region(20, 0), TableRegion::new(9, 0, 2, 1));
        assert_eq!(fallback_region(1, 1), TableRegion::new(0, 0, 1, 1));
    }

    #[test]
    fn test_contour_area_of_square() {
        let square = [
            ContourPoint::new(0, 0),
            ContourPoint::new(10, 0),
            ContourPoint::new(10, 10),
            ContourPoint::new(0, 10),
        ];
        assert_eq!(contour_area(&square), 100.0);
        assert_eq!(bounding_region(&square), Some(TableRegion::new(0, 0, 11, 11)));
    }
}
