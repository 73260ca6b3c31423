use std::collections::{HashSet, VecDeque};

use crate::core::{ActionId, Forest};
use crate::layout::{Cell, Grid};

/// Assigns every forest node a grid position plus connector metadata.
///
/// Lanes are rows. A node continues the row that already holds its parent on
/// the same branch; a fork event opens a new row column-aligned under the
/// cell it forks from; anything else starts a fresh row. Each cell records
/// the row its connector points back to, and one empty row separates
/// independent root subtrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn layout(&self, forest: &Forest) -> Grid {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (i, &root) in forest.roots.iter().enumerate() {
            if i > 0 {
                rows.push(Vec::new());
            }
            let mut queue = VecDeque::from([root]);
            let mut seen: HashSet<ActionId> = HashSet::from([root]);
            while let Some(node) = queue.pop_front() {
                place(forest, &mut rows, node);
                for &child in &forest.action(node).children {
                    if seen.insert(child) {
                        queue.push_back(child);
                    }
                }
            }
        }
        Grid { rows }
    }
}

/// Place one node. Lane continuation is tried across every row before the
/// fork rule is considered.
fn place(forest: &Forest, rows: &mut Vec<Vec<Cell>>, node: ActionId) {
    let action = forest.action(node);
    let branch = forest.branch_name(node);

    // Continue the lane already holding this node's parent.
    let continued = rows.iter().position(|row| {
        row.iter().filter_map(Cell::action).any(|placed| {
            forest.action(placed).id == action.parent_id && forest.branch_name(placed) == branch
        })
    });
    if let Some(row) = continued {
        rows[row].push(Cell::Node {
            action: node,
            source_row: row,
        });
        return;
    }

    // Fork off the lane carrying this node's own id, aligned to its column.
    if action.is_fork() {
        let forked = rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|cell| {
                    cell.action()
                        .map_or(false, |placed| forest.action(placed).id == action.id)
                })
                .map(|col| (r, col))
        });
        if let Some((row, col)) = forked {
            let mut lane = vec![Cell::Empty; col];
            lane.push(Cell::Node {
                action: node,
                source_row: row,
            });
            rows.push(lane);
            return;
        }
    }

    // Disconnected start.
    rows.push(vec![Cell::Node {
        action: node,
        source_row: 0,
    }]);
}
