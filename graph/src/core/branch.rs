use crate::core::action::ActionId;
use crate::decor::LaneColors;

/// One branch's slice of the forest.
#[derive(Debug, Clone)]
pub struct Branch {
    /// Unique branch name
    pub name: String,
    /// The branch's events in log order
    pub events: Vec<ActionId>,
    /// First event, once the branch tree has been linked
    pub root: Option<ActionId>,
    /// Outline/fill pair derived from the name
    pub colors: LaneColors,
}
