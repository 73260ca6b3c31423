use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use crate::decor::Rgb;

/// Arena index of an [`Action`] within a forest.
pub type ActionId = usize;

/// Index of a branch within a forest.
pub type BranchId = usize;

/// One logged change to a branch reference.
#[derive(Debug, Clone)]
pub struct Action {
    /// Id of the ref state this event replaced
    pub parent_id: String,
    /// Id the ref was moved to
    pub id: String,
    /// Author of the change
    pub user: String,
    /// When the change was recorded
    pub time: DateTime<Utc>,
    /// Categorical tag taken from the message prefix ("branch", "commit", ...)
    pub kind: String,
    /// Free text after the tag
    pub detail: String,
    /// Linked children, in insertion order
    pub children: SmallVec<[ActionId; 2]>,
    /// Back-reference to the owning branch
    pub branch: Option<BranchId>,
}

impl Action {
    /// Build an action from one parsed log tuple.
    ///
    /// The message is split at the first `:` into the kind tag and the
    /// detail text; a message with no colon becomes a bare tag with empty
    /// detail.
    pub fn new(
        parent_id: String,
        id: String,
        user: String,
        time: DateTime<Utc>,
        message: &str,
    ) -> Self {
        let (kind, detail) = match message.split_once(':') {
            Some((kind, detail)) => (kind.to_string(), detail.trim().to_string()),
            None => (message.trim().to_string(), String::new()),
        };

        Self {
            parent_id,
            id,
            user,
            time,
            kind,
            detail,
            children: SmallVec::new(),
            branch: None,
        }
    }

    /// Fork events split a new lane off an existing one.
    pub fn is_fork(&self) -> bool {
        self.kind == "branch"
    }

    /// Commit-like events connect back along their own lane.
    pub fn is_commit(&self) -> bool {
        self.kind.contains("commit")
    }

    /// Marker color for the event kind, used by renderers.
    pub fn marker_color(&self) -> Rgb {
        if self.kind == "branch" {
            Rgb::new(100, 255, 100)
        } else if self.kind.contains("rebase") {
            Rgb::new(100, 100, 255)
        } else if self.kind.contains("amend") {
            Rgb::new(150, 150, 150)
        } else {
            Rgb::new(0, 0, 0)
        }
    }
}
