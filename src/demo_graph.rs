use chrono::{DateTime, TimeZone, Utc};

use graph::{Action, BranchEvents, Forest, LayoutEngine, TextRenderer};

fn at(minute: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + minute * 60, 0)
        .single()
        .unwrap_or_default()
}

fn event(parent: &str, id: &str, minute: i64, message: &str) -> Action {
    Action::new(
        parent.to_string(),
        id.to_string(),
        "demo".to_string(),
        at(minute),
        message,
    )
}

fn main() {
    println!("Refgraph Demo");
    println!("=============\n");

    let main_branch = BranchEvents {
        name: "main".to_string(),
        events: vec![
            event("0000000", "a1", 0, "commit: initial import"),
            event("a1", "a2", 1, "commit: add core"),
            event("a2", "a3", 2, "commit: add renderer"),
        ],
    };
    let feature = BranchEvents {
        name: "feature".to_string(),
        events: vec![
            event("0000000", "a2", 3, "branch: Created from main"),
            event("a2", "b1", 4, "commit: start experiment"),
            event("b1", "b2", 5, "commit (amend): polish"),
        ],
    };

    let forest = Forest::build(vec![main_branch, feature]);

    let stats = forest.stats();
    println!("Forest statistics:");
    println!("  Branches: {}", stats.branches);
    println!("  Events:   {}", stats.events);
    println!("  Roots:    {}", stats.roots);
    println!("  Orphans:  {}", stats.orphans);
    println!();

    let grid = LayoutEngine::new().layout(&forest);
    let renderer = TextRenderer::new(true);

    println!("Branch Graph:");
    println!("─────────────");
    print!("{}", renderer.render(&forest, &grid));
}
