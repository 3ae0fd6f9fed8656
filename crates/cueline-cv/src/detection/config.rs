//! Tracker configuration

use crate::table::{HsvRange, preset_range};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Configuration errors surfaced to callers of the setters and loaders
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown table color preset '{0}'")]
    UnknownPreset(String),
    #[error("invalid HSV range: lower {lower:?}, upper {upper:?}")]
    InvalidHsv { lower: [u8; 3], upper: [u8; 3] },
    #[error("could not parse '{value}' as an HSV triple")]
    MalformedHsv { value: String },
}

/// Main tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub table_color: String,
    pub hsv: HsvRange,
    pub table_min_area: f64,
    pub max_bounces: usize,
    /// Per-frame cue-ball displacement, in pixels, that counts as motion.
    pub motion_threshold: f64,
    pub motion_history_len: usize,
    pub max_scan_steps: usize,
    /// Gate displayed predictions through the shot stabilizer.
    pub stabilize: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            table_color: "green".to_string(),
            hsv: HsvRange::default(),
            table_min_area: 50_000.0,
            max_bounces: 2,
            motion_threshold: 4.0,
            motion_history_len: 6,
            max_scan_steps: 4096,
            stabilize: true,
        }
    }
}

impl TrackerConfig {
    /// Defaults with the cloth range of a named preset
    pub fn for_preset(name: &str) -> std::result::Result<Self, ConfigError> {
        let hsv = preset_range(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        Ok(Self {
            table_color: name.to_string(),
            hsv,
            ..Default::default()
        })
    }

    /// Configuration that reports every fresh prediction without voting
    pub fn unstabilized() -> Self {
        Self {
            stabilize: false,
            ..Default::default()
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        if !config.hsv.is_valid() {
            return Err(ConfigError::InvalidHsv {
                lower: config.hsv.lower,
                upper: config.hsv.upper,
            }
            .into());
        }
        Ok(config)
    }

    /// Defaults overridden by `TABLE_CLOTH_COLOR`, `HSV_LOWER`/`HSV_UPPER`
    /// and `TABLE_MIN_AREA`. Bad values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = var("TABLE_CLOTH_COLOR") {
            match Self::for_preset(name.trim()) {
                Ok(preset) => config = preset,
                Err(e) => warn!("{}; using '{}'", e, config.table_color),
            }
        }

        if let (Some(lower), Some(upper)) = (var("HSV_LOWER"), var("HSV_UPPER")) {
            match (parse_hsv(&lower), parse_hsv(&upper)) {
                (Ok(lower), Ok(upper)) if HsvRange::new(lower, upper).is_valid() => {
                    config.hsv = HsvRange::new(lower, upper);
                }
                _ => warn!(
                    "Could not use HSV_LOWER='{}' HSV_UPPER='{}'; keeping {:?}",
                    lower, upper, config.hsv
                ),
            }
        }

        if let Some(area) = var("TABLE_MIN_AREA") {
            match area.trim().parse::<f64>() {
                Ok(area) if area >= 0.0 => config.table_min_area = area,
                _ => warn!(
                    "Could not convert TABLE_MIN_AREA='{}'; using default {}",
                    area, config.table_min_area
                ),
            }
        }

        config
    }
}

/// Parse `"35, 40, 40"`
pub fn parse_hsv(value: &str) -> std::result::Result<[u8; 3], ConfigError> {
    let malformed = || ConfigError::MalformedHsv {
        value: value.to_string(),
    };
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| malformed()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    <[u8; 3]>::try_from(parts).map_err(|_| malformed())
}
