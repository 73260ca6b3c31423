pub mod lane;

pub use lane::{LaneColors, Rgb};
