pub mod action;
pub mod branch;
pub mod forest;

pub use action::{Action, ActionId, BranchId};
pub use branch::Branch;
pub use forest::{BranchEvents, Forest, ForestStats};
