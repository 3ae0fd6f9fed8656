//! Per-session tracker: one camera, one table

use super::config::{ConfigError, TrackerConfig};
use super::input::{DetectionClass, RawDetection};
use super::report::FrameReport;
use super::selection::{PrimarySelector, Selection};
use crate::bbox::BBox;
use crate::classify::{BallClassifier, BallColorInfo, ClassifiedBall};
use crate::prediction::{PhaseTransition, ShotPhase, ShotPrediction, ShotPredictor, ShotStabilizer};
use crate::table::{HsvRange, TableLayout, TableLocator, preset_range};
use crate::traits::ObjectDetector;
use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use image::RgbImage;
use tracing::{debug, info, warn};

/// Owns all state of one session: the cached table, the contact-point
/// history and the stabilizer.
///
/// Not meant to be shared across threads; run one tracker per camera.
pub struct PoolTracker {
    config: TrackerConfig,
    custom_hsv: HsvRange,
    locator: TableLocator,
    classifier: BallClassifier,
    predictor: ShotPredictor,
    stabilizer: ShotStabilizer,
}

impl PoolTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let custom_hsv = if config.table_color == "custom" {
            config.hsv
        } else {
            preset_range("custom").unwrap_or_default()
        };

        Self {
            custom_hsv,
            locator: TableLocator::new(config.hsv, config.table_min_area),
            classifier: BallClassifier::new(),
            predictor: ShotPredictor::new(config.max_bounces, config.max_scan_steps),
            stabilizer: ShotStabilizer::new(config.motion_threshold, config.motion_history_len),
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn phase(&self) -> ShotPhase {
        self.stabilizer.phase()
    }

    /// Layout used for the last frame, if any
    pub fn table(&self) -> Option<&TableLayout> {
        self.locator.cached()
    }

    /// Switch the cloth preset. The table is re-detected on the next frame.
    pub fn set_color_preset(&mut self, name: &str) -> std::result::Result<(), ConfigError> {
        let range = if name == "custom" {
            self.custom_hsv
        } else {
            preset_range(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?
        };

        self.apply_range(name, range);
        Ok(())
    }

    /// Install a custom cloth range and make it the active preset.
    pub fn set_custom_hsv(
        &mut self,
        lower: [u8; 3],
        upper: [u8; 3],
    ) -> std::result::Result<(), ConfigError> {
        let range = HsvRange::new(lower, upper);
        if !range.is_valid() {
            return Err(ConfigError::InvalidHsv { lower, upper });
        }

        self.custom_hsv = range;
        self.apply_range("custom", range);
        Ok(())
    }

    fn apply_range(&mut self, name: &str, range: HsvRange) {
        info!("Table color set to '{}' ({:?} - {:?})", name, range.lower, range.upper);
        self.config.table_color = name.to_string();
        self.config.hsv = range;
        self.locator.set_range(range);
    }

    /// Drop the cached table so the next frame re-detects it.
    pub fn invalidate_table(&mut self) {
        self.locator.invalidate();
    }

    /// Analyze one frame given detections in table-ROI coordinates.
    ///
    /// Never fails: missing objects or prediction faults only leave the
    /// prediction empty.
    pub fn process(&mut self, frame: &RgbImage, detections: &[RawDetection]) -> FrameReport {
        let (layout, roi) = self.table_roi(frame);
        self.process_located(&layout, roi.as_ref(), detections)
    }

    /// Run `detector` on the table ROI, then [`process`](Self::process) its
    /// output.
    pub fn process_with_detector(
        &mut self,
        frame: &RgbImage,
        detector: &dyn ObjectDetector,
    ) -> Result<FrameReport> {
        let (layout, roi) = self.table_roi(frame);
        let detections = match &roi {
            Some(roi) => detector
                .detect(roi)
                .context("Object detector failed on table ROI")?,
            None => Vec::new(),
        };
        Ok(self.process_located(&layout, roi.as_ref(), &detections))
    }

    fn table_roi(&mut self, frame: &RgbImage) -> (TableLayout, Option<RgbImage>) {
        let layout = self.locator.locate(frame).clone();
        let region = layout.region;
        let roi = ImageUtils::safe_crop(frame, region.x, region.y, region.width, region.height);
        (layout, roi)
    }

    fn process_located(
        &mut self,
        layout: &TableLayout,
        roi: Option<&RgbImage>,
        detections: &[RawDetection],
    ) -> FrameReport {
        let selection = self.select(layout, roi, detections);
        let prediction = self.update_prediction(&selection, layout);

        FrameReport::new(
            self.stabilizer.phase(),
            selection.white.as_ref(),
            &selection.balls,
            selection.cue.as_ref(),
            prediction.as_ref(),
            layout,
        )
    }

    /// Map detections to frame coordinates, classify color balls on the ROI
    /// and pick the canonical objects.
    fn select(
        &self,
        layout: &TableLayout,
        roi: Option<&RgbImage>,
        detections: &[RawDetection],
    ) -> Selection {
        let (dx, dy) = (layout.region.x, layout.region.y);
        let mut whites: Vec<BBox> = Vec::new();
        let mut balls: Vec<ClassifiedBall> = Vec::new();
        let mut cue: Option<BBox> = None;

        for detection in detections {
            let Some(class) = detection.class() else {
                debug!("Ignoring detection with class '{}'", detection.class);
                continue;
            };
            let Some(local) = detection.to_bbox() else {
                debug!("Ignoring out-of-range {} box {:?}", detection.class, detection.bbox);
                continue;
            };
            let global = local.translated(dx, dy);

            match class {
                DetectionClass::WhiteBall => whites.push(global),
                DetectionClass::ColorBall => {
                    let info = roi
                        .map(|roi| self.classifier.classify_region(roi, &local))
                        .unwrap_or_else(BallColorInfo::unknown);
                    balls.push(ClassifiedBall::new(global, info));
                }
                DetectionClass::Cue => {
                    if cue.is_none() {
                        cue = Some(global);
                    }
                }
            }
        }

        debug!(
            "Frame objects: {} white, {} color, cue: {}",
            whites.len(),
            balls.len(),
            cue.is_some()
        );
        PrimarySelector::select(&whites, balls, cue)
    }

    /// The prediction to report for this frame.
    fn update_prediction(
        &mut self,
        selection: &Selection,
        layout: &TableLayout,
    ) -> Option<ShotPrediction> {
        if !self.config.stabilize {
            return self.predict(selection, layout);
        }

        if let (Some(white), Some(_)) = (&selection.white, &selection.cue) {
            if self.stabilizer.observe(white.center()) == PhaseTransition::Settled {
                self.predictor.reset_contact_history();
            }
        }

        match self.stabilizer.phase() {
            ShotPhase::InMotion => self.stabilizer.displayed().cloned(),
            ShotPhase::Aiming => {
                if selection.white.is_some()
                    && selection.cue.is_some()
                    && selection.object_ball().is_some()
                {
                    let fresh = self.predict(selection, layout);
                    self.stabilizer.record(fresh);
                }
                None
            }
        }
    }

    fn predict(&mut self, selection: &Selection, layout: &TableLayout) -> Option<ShotPrediction> {
        let (Some(white), Some(cue), Some(object)) =
            (&selection.white, &selection.cue, selection.object_ball())
        else {
            return None;
        };

        match self.predictor.predict(cue, white, object, layout) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!("Prediction skipped for this frame: {}", e);
                None
            }
        }
    }
}
