use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::core::{Action, ActionId, Branch, BranchId};
use crate::decor::LaneColors;

/// Per-branch input to [`Forest::build`]: a branch name and its events in
/// log order.
#[derive(Debug, Clone)]
pub struct BranchEvents {
    pub name: String,
    pub events: Vec<Action>,
}

/// All branch trees merged into one structure.
///
/// Nodes live in a single arena and refer to each other by index, so the
/// merge step can re-parent a root across branch boundaries without touching
/// ownership.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    /// Node arena; every [`ActionId`] indexes into this.
    pub actions: Vec<Action>,
    /// All branches, in input order.
    pub branches: Vec<Branch>,
    /// Entry points: branch roots not reachable inside another branch's tree.
    pub roots: Vec<ActionId>,
    /// Events whose declared parent was never found; excluded from every tree.
    pub orphans: Vec<ActionId>,
}

impl Forest {
    /// Build the forest: intern every branch's events, link each branch into
    /// a tree, then fold roots that are really descendants of another branch.
    pub fn build(sources: Vec<BranchEvents>) -> Self {
        let mut forest = Forest::default();
        for source in sources {
            forest.intern_branch(source);
        }
        for branch in 0..forest.branches.len() {
            forest.link_branch(branch);
        }
        forest.merge_roots();
        forest
    }

    pub fn action(&self, id: ActionId) -> &Action {
        &self.actions[id]
    }

    pub fn branch(&self, id: BranchId) -> &Branch {
        &self.branches[id]
    }

    /// Name of the branch an action was read from.
    pub fn branch_name(&self, id: ActionId) -> &str {
        self.actions[id]
            .branch
            .map(|b| self.branches[b].name.as_str())
            .unwrap_or("")
    }

    /// Lane colors of the branch an action was read from.
    pub fn lane_colors(&self, id: ActionId) -> LaneColors {
        match self.actions[id].branch {
            Some(branch) => self.branches[branch].colors,
            None => LaneColors::derive(""),
        }
    }

    pub fn stats(&self) -> ForestStats {
        ForestStats {
            branches: self.branches.len(),
            events: self.actions.len(),
            linked: self.actions.len() - self.orphans.len(),
            roots: self.roots.len(),
            orphans: self.orphans.len(),
        }
    }

    fn intern_branch(&mut self, source: BranchEvents) {
        let branch = self.branches.len();
        let colors = LaneColors::derive(&source.name);
        let mut events = Vec::with_capacity(source.events.len());
        for mut action in source.events {
            action.branch = Some(branch);
            events.push(self.actions.len());
            self.actions.push(action);
        }
        self.branches.push(Branch {
            name: source.name,
            events,
            root: None,
            colors,
        });
    }

    /// Link one branch's events into a tree.
    ///
    /// The first event becomes the tentative root. Every later event is
    /// attached under the first node (in breadth-first order) whose id equals
    /// the event's declared parent; events with no such node are dropped and
    /// never searched again.
    fn link_branch(&mut self, branch: BranchId) {
        let events = self.branches[branch].events.clone();
        let mut root = None;
        for event in events {
            let Some(tree) = root else {
                root = Some(event);
                continue;
            };
            let parent = self.actions[event].parent_id.clone();
            match self.find_node(tree, &parent) {
                Some(host) => self.actions[host].children.push(event),
                None => {
                    trace!(
                        branch = %self.branches[branch].name,
                        id = %self.actions[event].id,
                        "dropping event with unknown parent"
                    );
                    self.orphans.push(event);
                }
            }
        }
        self.branches[branch].root = root;
    }

    /// First node in breadth-first order whose id matches, starting at `root`.
    /// The seen set keeps traversal bounded even if duplicate ids across
    /// branches produced shared structure during merge.
    fn find_node(&self, root: ActionId, id: &str) -> Option<ActionId> {
        let mut queue = VecDeque::from([root]);
        let mut seen: HashSet<ActionId> = HashSet::from([root]);
        while let Some(node) = queue.pop_front() {
            if self.actions[node].id == id {
                return Some(node);
            }
            for &child in &self.actions[node].children {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        None
    }

    /// Attach branch roots that appear inside another branch's tree.
    ///
    /// Candidates are scanned in branch order; for each one, every other
    /// tree is searched in the same order, skipping trees whose root carries
    /// the candidate's exact `(id, parent_id)` pair. The first hit adopts the
    /// candidate. Surviving roots are deduplicated by `(id, parent_id)`,
    /// keeping the first occurrence.
    fn merge_roots(&mut self) {
        let candidates: Vec<ActionId> = self.branches.iter().filter_map(|b| b.root).collect();
        let mut excluded = vec![false; candidates.len()];

        for (i, &root) in candidates.iter().enumerate() {
            let id = self.actions[root].id.clone();
            let parent_id = self.actions[root].parent_id.clone();
            for &other in &candidates {
                let twin = self.actions[other].id == id && self.actions[other].parent_id == parent_id;
                if twin {
                    continue;
                }
                if let Some(host) = self.find_node(other, &id) {
                    debug!(
                        id = %id,
                        into = %self.branch_name(host),
                        "branch root adopted during merge"
                    );
                    self.actions[host].children.push(root);
                    excluded[i] = true;
                    break;
                }
            }
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut roots = Vec::new();
        for (i, &root) in candidates.iter().enumerate() {
            if excluded[i] {
                continue;
            }
            let key = (
                self.actions[root].id.clone(),
                self.actions[root].parent_id.clone(),
            );
            if seen.insert(key) {
                roots.push(root);
            }
        }
        self.roots = roots;
    }
}

/// Aggregate counts over a built forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestStats {
    pub branches: usize,
    pub events: usize,
    pub linked: usize,
    pub roots: usize,
    pub orphans: usize,
}
