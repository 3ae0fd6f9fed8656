//! Ball numbering for standard pool sets.

use super::color::{BallColor, BallStyle};
use serde::{Deserialize, Serialize};

/// Stripe-ratio cut used when the style could not be decided.
pub const AMBIGUOUS_STRIPE_WHITE_RATIO: f64 = 0.30;

/// Classified identity of one ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BallIdentity {
    pub color: BallColor,
    pub style: BallStyle,
    pub white_ratio: f64,
}

impl BallIdentity {
    pub fn new(color: BallColor, style: BallStyle, white_ratio: f64) -> Self {
        Self {
            color,
            style,
            white_ratio,
        }
    }

    pub fn number(&self) -> Option<u8> {
        ball_number(self.color, self.style, self.white_ratio)
    }

    /// Display label in the "<Color> - <Style>" form.
    pub fn label(&self) -> String {
        format!("{} - {}", self.color, self.style)
    }
}

/// (solid, stripe) numbers for each paired color.
pub fn number_pair(color: BallColor) -> Option<(u8, u8)> {
    match color {
        BallColor::Yellow => Some((1, 9)),
        BallColor::Blue => Some((2, 10)),
        BallColor::Red => Some((3, 11)),
        BallColor::Purple => Some((4, 12)),
        BallColor::Orange => Some((5, 13)),
        BallColor::Green => Some((6, 14)),
        BallColor::Brown => Some((7, 15)),
        BallColor::White | BallColor::Black | BallColor::Unknown => None,
    }
}

/// Map a classified color/style to a ball number (0 is the cue ball).
pub fn ball_number(color: BallColor, style: BallStyle, white_ratio: f64) -> Option<u8> {
    if color == BallColor::White || style == BallStyle::Cue {
        return Some(0);
    }
    if color == BallColor::Black {
        return Some(8);
    }

    let (solid, stripe) = number_pair(color)?;
    match style {
        BallStyle::Stripe => Some(stripe),
        BallStyle::Solid => Some(solid),
        _ if white_ratio > AMBIGUOUS_STRIPE_WHITE_RATIO => Some(stripe),
        _ => Some(solid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_balls() {
        assert_eq!(ball_number(BallColor::White, BallStyle::Cue, 0.9), Some(0));
        assert_eq!(ball_number(BallColor::Black, BallStyle::Solid, 0.0), Some(8));
        assert_eq!(ball_number(BallColor::Unknown, BallStyle::Unknown, 0.5), None);
    }

    #[test]
    fn test_solid_and_stripe_numbers() {
        assert_eq!(ball_number(BallColor::Yellow, BallStyle::Solid, 0.0), Some(1));
        assert_eq!(ball_number(BallColor::Yellow, BallStyle::Stripe, 0.0), Some(9));
        assert_eq!(ball_number(BallColor::Brown, BallStyle::Solid, 0.0), Some(7));
        assert_eq!(ball_number(BallColor::Green, BallStyle::Stripe, 0.0), Some(14));
    }

    #[test]
    fn test_ambiguous_style_uses_white_ratio() {
        assert_eq!(ball_number(BallColor::Blue, BallStyle::Unknown, 0.31), Some(10));
        assert_eq!(ball_number(BallColor::Blue, BallStyle::Unknown, 0.30), Some(2));
    }

    #[test]
    fn test_identity_label() {
        let identity = BallIdentity::new(BallColor::Red, BallStyle::Stripe, 0.4);
        assert_eq!(identity.label(), "Red - Stripe");
        assert_eq!(identity.number(), Some(11));
    }
}
