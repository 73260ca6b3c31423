use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use tracing::warn;

use graph::{Action, BranchEvents, Forest, LayoutEngine, TextRenderer};
use refgraph_core::{reflog, LogStore};

#[derive(Parser)]
#[command(name = "refgraph")]
#[command(about = "Branch history graphs from git reflogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the branch history graph
    Show {
        /// Path to the working directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Disable ANSI colors
        #[arg(long)]
        plain: bool,
    },
    /// List branches with their lane colors
    Branches {
        /// Path to the working directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Show forest statistics and orphaned entries
    Stats {
        /// Path to the working directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Show {
        dir: PathBuf::from("."),
        plain: false,
    }) {
        Commands::Show { dir, plain } => cmd_show(&dir, plain),
        Commands::Branches { dir } => cmd_branches(&dir),
        Commands::Stats { dir } => cmd_stats(&dir),
    }
}

/// Read every branch log under the directory and build the merged forest.
/// Malformed lines are skipped with a warning; they never reach the graph.
fn load_forest(dir: &Path) -> Result<Forest> {
    let store = LogStore::discover(dir)?;
    let mut sources = Vec::new();
    for log in store.branch_logs()? {
        let text = store.read_log(&log)?;
        let mut events = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match reflog::parse_line(line) {
                Ok(record) => {
                    let time = Utc
                        .timestamp_opt(record.timestamp, 0)
                        .single()
                        .with_context(|| {
                            format!("timestamp out of range in {}:{}", log.name, lineno + 1)
                        })?;
                    events.push(Action::new(
                        record.parent_id,
                        record.id,
                        record.user,
                        time,
                        &record.message,
                    ));
                }
                Err(err) => warn!(
                    branch = %log.name,
                    line = lineno + 1,
                    %err,
                    "skipping malformed reflog line"
                ),
            }
        }
        sources.push(BranchEvents {
            name: log.name,
            events,
        });
    }
    Ok(Forest::build(sources))
}

fn cmd_show(dir: &Path, plain: bool) -> Result<()> {
    let forest = load_forest(dir)?;
    let grid = LayoutEngine::new().layout(&forest);
    print!("{}", TextRenderer::new(!plain).render(&forest, &grid));
    Ok(())
}

fn cmd_branches(dir: &Path) -> Result<()> {
    let forest = load_forest(dir)?;
    for branch in &forest.branches {
        println!(
            "{}  fill {}  outline {}  {} events",
            branch.name,
            branch.colors.fill,
            branch.colors.outline,
            branch.events.len()
        );
    }
    Ok(())
}

fn cmd_stats(dir: &Path) -> Result<()> {
    let forest = load_forest(dir)?;
    let stats = forest.stats();
    println!("Branches: {}", stats.branches);
    println!("Events:   {}", stats.events);
    println!("Linked:   {}", stats.linked);
    println!("Roots:    {}", stats.roots);
    println!("Orphans:  {}", stats.orphans);

    if !forest.orphans.is_empty() {
        println!();
        println!("Orphaned entries:");
        for &orphan in &forest.orphans {
            let action = forest.action(orphan);
            println!(
                "  {} {} ({}: {})",
                forest.branch_name(orphan),
                action.id,
                action.kind,
                action.detail
            );
        }
    }
    Ok(())
}
