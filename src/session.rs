//! Recorded session replay: frames on disk plus per-frame detections

use anyhow::Context;
use cueline_cv::utils::ImageUtils;
use cueline_cv::{FrameReport, PoolTracker, RawDetection, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One recorded frame
#[derive(Debug, Clone, Deserialize)]
pub struct FrameEntry {
    pub image: PathBuf,
    #[serde(default)]
    pub detections: Vec<RawDetection>,
}

/// Ordered frames of a recording
#[derive(Debug, Clone)]
pub struct Manifest {
    pub frames: Vec<FrameEntry>,
}

impl Manifest {
    /// Load a manifest; relative image paths resolve against its directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {:?}", path))?;
        let mut frames: Vec<FrameEntry> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse manifest: {:?}", path))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for frame in &mut frames {
            if frame.image.is_relative() {
                frame.image = base.join(&frame.image);
            }
        }

        Ok(Self { frames })
    }
}

/// Feed every frame through `tracker` in order.
pub fn replay(tracker: &mut PoolTracker, manifest: &Manifest) -> Result<Vec<FrameReport>> {
    let mut reports = Vec::with_capacity(manifest.frames.len());

    for (index, entry) in manifest.frames.iter().enumerate() {
        let frame = ImageUtils::load_rgb(&entry.image)
            .with_context(|| format!("Frame {} could not be loaded", index))?;
        let report = tracker.process(&frame, &entry.detections);

        tracing::debug!(
            "Frame {}: phase {:?}, {} balls, prediction: {}",
            index,
            report.phase,
            report.balls.len(),
            report.prediction.is_some()
        );
        reports.push(report);
    }

    Ok(reports)
}
