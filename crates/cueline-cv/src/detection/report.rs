//! Per-frame output record

use crate::bbox::BBox;
use crate::classify::ClassifiedBall;
use crate::prediction::{ShotPhase, ShotPrediction};
use crate::table::TableLayout;
use cueline_core::{BallColor, BallStyle, Point};
use serde::Serialize;

/// Overlay color of the predicted path, BGR.
pub const PATH_COLOR: [u8; 3] = [80, 145, 75];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    #[default]
    Analyzing,
}

/// One classified color ball
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallReport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub radius: i32,
    pub conf: f64,
    pub color: BallColor,
    pub style: BallStyle,
    pub number: Option<u8>,
}

impl From<&ClassifiedBall> for BallReport {
    fn from(ball: &ClassifiedBall) -> Self {
        let [x, y, w, h] = ball.bbox.to_xywh();
        Self {
            x,
            y,
            w,
            h,
            radius: ball.radius,
            conf: ball.bbox.confidence,
            color: ball.info.label,
            style: ball.info.style,
            number: ball.number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionReport {
    pub prediction: bool,
    pub paths: Vec<Point>,
    pub color: [u8; 3],
    pub collision_point: Point,
    /// `"Yellow - Solid"`
    pub ball_color: String,
    pub ball_number: Option<u8>,
}

impl From<&ShotPrediction> for PredictionReport {
    fn from(shot: &ShotPrediction) -> Self {
        Self {
            prediction: shot.will_pocket,
            paths: shot.path.clone(),
            color: PATH_COLOR,
            collision_point: shot.impact_point,
            ball_color: format!("{} - {}", shot.target_color, shot.target_style),
            ball_number: shot.target_number,
        }
    }
}

/// Everything the engine reports for one frame, frame coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub status: FrameStatus,
    pub phase: ShotPhase,
    pub white_ball: Option<[i32; 4]>,
    pub balls: Vec<BallReport>,
    pub cue: Option<[i32; 4]>,
    pub prediction: Option<PredictionReport>,
    pub table_roi: [i32; 4],
    pub holes: Vec<Point>,
}

impl FrameReport {
    pub fn new(
        phase: ShotPhase,
        white: Option<&BBox>,
        balls: &[ClassifiedBall],
        cue: Option<&BBox>,
        prediction: Option<&ShotPrediction>,
        layout: &TableLayout,
    ) -> Self {
        Self {
            status: FrameStatus::Analyzing,
            phase,
            white_ball: white.map(BBox::to_xywh),
            balls: balls.iter().map(BallReport::from).collect(),
            cue: cue.map(BBox::to_xywh),
            prediction: prediction.map(PredictionReport::from),
            table_roi: layout.region.to_xywh(),
            holes: layout.pocket_centers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::BallColorInfo;
    use crate::table::TableRegion;

    #[test]
    fn test_report_json_shape() -> crate::Result<()> {
        let layout = TableLayout::from_region(TableRegion::new(100, 100, 800, 400));
        let ball = ClassifiedBall::new(
            BBox::from_corners(290, 290, 310, 310, 0.8),
            BallColorInfo {
                label: BallColor::Yellow,
                style: BallStyle::Solid,
                ..Default::default()
            },
        );
        let shot = ShotPrediction {
            impact_point: Point::new(311, 311),
            path: vec![Point::new(300, 300), Point::new(140, 140)],
            will_pocket: true,
            target_color: BallColor::Yellow,
            target_style: BallStyle::Solid,
            target_number: Some(1),
        };

        let report = FrameReport::new(
            ShotPhase::InMotion,
            Some(&BBox::new(390, 390, 20, 20, 0.9)),
            std::slice::from_ref(&ball),
            None,
            Some(&shot),
            &layout,
        );
        let json = serde_json::to_value(&report)?;

        assert_eq!(json["status"], "analyzing");
        assert_eq!(json["phase"], "in_motion");
        assert_eq!(json["white_ball"], serde_json::json!([390, 390, 20, 20]));
        assert!(json["cue"].is_null());
        assert_eq!(json["table_roi"], serde_json::json!([100, 100, 800, 400]));
        assert_eq!(json["holes"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["holes"][0], serde_json::json!([152, 152]));

        let ball = &json["balls"][0];
        assert_eq!(ball["radius"], 10);
        assert_eq!(ball["color"], "Yellow");
        assert_eq!(ball["number"], 1);

        let prediction = &json["prediction"];
        assert_eq!(prediction["prediction"], true);
        assert_eq!(prediction["paths"], serde_json::json!([[300, 300], [140, 140]]));
        assert_eq!(prediction["collision_point"], serde_json::json!([311, 311]));
        assert_eq!(prediction["color"], serde_json::json!([80, 145, 75]));
        assert_eq!(prediction["ball_color"], "Yellow - Solid");
        assert_eq!(prediction["ball_number"], 1);
        Ok(())
    }
}
