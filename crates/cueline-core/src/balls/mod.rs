pub mod catalogue;
pub mod color;

pub use catalogue::{BallIdentity, ball_number};
pub use color::{BallColor, BallStyle};
