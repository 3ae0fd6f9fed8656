use serde::{Deserialize, Serialize};
use std::fmt;

/// Dominant color of a pool ball as seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BallColor {
    White,
    Black,
    Yellow,
    Blue,
    Red,
    Purple,
    Orange,
    Green,
    Brown,
    #[default]
    Unknown,
}

impl BallColor {
    pub fn name(&self) -> &'static str {
        match self {
            BallColor::White => "White",
            BallColor::Black => "Black",
            BallColor::Yellow => "Yellow",
            BallColor::Blue => "Blue",
            BallColor::Red => "Red",
            BallColor::Purple => "Purple",
            BallColor::Orange => "Orange",
            BallColor::Green => "Green",
            BallColor::Brown => "Brown",
            BallColor::Unknown => "Unknown",
        }
    }

    /// True for the seven colors that come in a solid and a stripe variant.
    pub fn is_numbered_pair(&self) -> bool {
        !matches!(self, BallColor::White | BallColor::Black | BallColor::Unknown)
    }
}

impl fmt::Display for BallColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visual family of a ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BallStyle {
    Solid,
    Stripe,
    Cue,
    #[default]
    Unknown,
}

impl BallStyle {
    pub fn name(&self) -> &'static str {
        match self {
            BallStyle::Solid => "Solid",
            BallStyle::Stripe => "Stripe",
            BallStyle::Cue => "Cue",
            BallStyle::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BallStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
