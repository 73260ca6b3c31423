pub mod core;
pub mod decor;
pub mod layout;
pub mod render;

pub use crate::core::{Action, ActionId, Branch, BranchEvents, BranchId, Forest, ForestStats};
pub use crate::decor::{LaneColors, Rgb};
pub use crate::layout::{Cell, Grid, LayoutEngine, RowIdx};
pub use crate::render::TextRenderer;
