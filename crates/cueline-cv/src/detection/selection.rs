//! Reduce a frame's detections to one white ball, one object ball, one cue

use crate::bbox::BBox;
use crate::classify::ClassifiedBall;

/// Canonical objects of one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub white: Option<BBox>,
    pub cue: Option<BBox>,
    /// All color balls in selection order; the first is the object ball.
    pub balls: Vec<ClassifiedBall>,
}

impl Selection {
    pub fn object_ball(&self) -> Option<&ClassifiedBall> {
        self.balls.first()
    }
}

/// Primary object selection
pub struct PrimarySelector;

impl PrimarySelector {
    /// Pick the most confident white ball and order the color balls: nearest
    /// to the cue center first when a cue is present, otherwise most
    /// confident first. Ties keep detection order.
    pub fn select(whites: &[BBox], mut balls: Vec<ClassifiedBall>, cue: Option<BBox>) -> Selection {
        let white = whites
            .iter()
            .min_by(|a, b| b.confidence.total_cmp(&a.confidence))
            .copied();

        match cue {
            Some(cue_box) => {
                let target = cue_box.center();
                balls.sort_by_key(|ball| ball.bbox.center().distance_squared(&target));
            }
            None => balls.sort_by(|a, b| b.bbox.confidence.total_cmp(&a.bbox.confidence)),
        }

        Selection { white, cue, balls }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::BallColorInfo;

    fn ball(x: i32, y: i32, confidence: f64) -> ClassifiedBall {
        ClassifiedBall::new(BBox::new(x, y, 20, 20, confidence), BallColorInfo::unknown())
    }

    #[test]
    fn test_white_by_confidence_first_wins_ties() {
        let whites = [
            BBox::new(0, 0, 10, 10, 0.5),
            BBox::new(50, 0, 10, 10, 0.9),
            BBox::new(90, 0, 10, 10, 0.9),
        ];
        let selection = PrimarySelector::select(&whites, Vec::new(), None);
        assert_eq!(selection.white.map(|b| b.x), Some(50));
    }

    #[test]
    fn test_object_ball_nearest_cue() {
        let balls = vec![ball(0, 0, 0.99), ball(200, 200, 0.4), ball(100, 100, 0.5)];
        let cue = Some(BBox::new(210, 210, 20, 20, 0.8));

        let selection = PrimarySelector::select(&[], balls, cue);
        let order: Vec<i32> = selection.balls.iter().map(|b| b.bbox.x).collect();
        assert_eq!(order, vec![200, 100, 0]);
        assert_eq!(selection.object_ball().map(|b| b.bbox.x), Some(200));
    }

    #[test]
    fn test_object_ball_by_confidence_without_cue() {
        let balls = vec![ball(0, 0, 0.3), ball(200, 200, 0.7), ball(100, 100, 0.7)];

        let selection = PrimarySelector::select(&[], balls, None);
        let order: Vec<i32> = selection.balls.iter().map(|b| b.bbox.x).collect();
        assert_eq!(order, vec![200, 100, 0]);
    }

    #[test]
    fn test_empty_frame() {
        let selection = PrimarySelector::select(&[], Vec::new(), None);
        assert_eq!(selection, Selection::default());
        assert!(selection.object_ball().is_none());
    }
}
