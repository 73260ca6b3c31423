use unicode_width::UnicodeWidthStr;

use crate::core::Forest;
use crate::decor::Rgb;
use crate::layout::{Cell, Grid};

/// Glyphs used by the text renderer.
pub mod chars {
    /// Node marker
    pub const MARKER: char = '●';
    /// Corner of the L-shaped fork connector
    pub const FORK: char = '└';
    /// Back-connector along the parent lane
    pub const BACK: char = '─';
}

const RESET: &str = "\x1b[0m";

fn fg(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// Renders a layout grid as terminal text, one grid row per line, with a
/// branch legend underneath.
///
/// Fork cells get the L-corner glyph, commit cells the back-connector, other
/// kinds a bare marker. Markers take the branch fill color, connectors the
/// event's marker color.
pub struct TextRenderer {
    colored: bool,
}

impl TextRenderer {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn render(&self, forest: &Forest, grid: &Grid) -> String {
        let mut out = String::new();
        for (r, row) in grid.rows.iter().enumerate() {
            let mut line = String::new();
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Empty => line.push_str("   "),
                    Cell::Node { action, .. } => {
                        let node = forest.action(*action);
                        let connector = if r == 0 && c == 0 {
                            ' '
                        } else if node.is_fork() {
                            chars::FORK
                        } else if node.is_commit() {
                            chars::BACK
                        } else {
                            ' '
                        };
                        if self.colored {
                            line.push_str(&fg(node.marker_color()));
                            line.push(connector);
                            line.push_str(&fg(forest.lane_colors(*action).fill));
                            line.push(chars::MARKER);
                            line.push_str(RESET);
                        } else {
                            line.push(connector);
                            line.push(chars::MARKER);
                        }
                        line.push(' ');
                    }
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.legend(forest));
        out
    }

    fn legend(&self, forest: &Forest) -> String {
        let width = forest
            .branches
            .iter()
            .map(|b| UnicodeWidthStr::width(b.name.as_str()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for branch in &forest.branches {
            let pad = " ".repeat(width - UnicodeWidthStr::width(branch.name.as_str()));
            let marker = if self.colored {
                format!("{}{}{}", fg(branch.colors.fill), chars::MARKER, RESET)
            } else {
                chars::MARKER.to_string()
            };
            out.push_str(&format!(
                "{} {}{}  {} events\n",
                marker,
                branch.name,
                pad,
                branch.events.len()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, BranchEvents};
    use crate::layout::LayoutEngine;
    use chrono::{TimeZone, Utc};

    fn event(parent: &str, id: &str, message: &str) -> Action {
        Action::new(
            parent.to_string(),
            id.to_string(),
            "tester".to_string(),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            message,
        )
    }

    fn sample_forest() -> Forest {
        Forest::build(vec![
            BranchEvents {
                name: "main".to_string(),
                events: vec![
                    event("p0", "a1", "commit: one"),
                    event("a1", "a2", "commit: two"),
                ],
            },
            BranchEvents {
                name: "feature".to_string(),
                events: vec![
                    event("a1", "a2", "branch: Created from main"),
                    event("a2", "b1", "commit: work"),
                ],
            },
        ])
    }

    #[test]
    fn test_plain_render_layout() {
        let forest = sample_forest();
        let grid = LayoutEngine::new().layout(&forest);
        let output = TextRenderer::new(false).render(&forest, &grid);
        let lines: Vec<&str> = output.lines().collect();

        // Root cell carries no connector; its sibling connects back.
        assert_eq!(lines[0], " ● ─●");
        // The forked lane starts one column in, under its source cell.
        assert_eq!(lines[1], "   └● ─●");
    }

    #[test]
    fn test_plain_render_has_no_escape_codes() {
        let forest = sample_forest();
        let grid = LayoutEngine::new().layout(&forest);
        let output = TextRenderer::new(false).render(&forest, &grid);
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_colored_render_uses_branch_fill() {
        let forest = sample_forest();
        let grid = LayoutEngine::new().layout(&forest);
        let output = TextRenderer::new(true).render(&forest, &grid);

        let fill = forest.branches[0].colors.fill;
        assert!(output.contains(&fg(fill)));
        assert!(output.contains(RESET));
    }

    #[test]
    fn test_legend_lists_every_branch() {
        let forest = sample_forest();
        let grid = LayoutEngine::new().layout(&forest);
        let output = TextRenderer::new(false).render(&forest, &grid);

        assert!(output.contains("main"));
        assert!(output.contains("feature"));
        assert!(output.contains("2 events"));
    }
}
