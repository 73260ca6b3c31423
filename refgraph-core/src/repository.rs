use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// A branch's on-disk reflog artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchLog {
    /// Branch name, with `/` separators for nested refs
    pub name: String,
    /// Path of the log file
    pub path: PathBuf,
}

/// Read access to a repository's per-branch reflog files.
pub struct LogStore {
    git_dir: PathBuf,
}

impl LogStore {
    /// Locate the `.git` directory under a working directory.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let git_dir = dir.join(".git");
        if !git_dir.is_dir() {
            bail!("no .git directory under {}", dir.display());
        }
        debug!(git_dir = %git_dir.display(), "opened log store");
        Ok(Self { git_dir })
    }

    /// Enumerate branch log files under `logs/refs/heads`, nested refs
    /// included. Results are sorted by name so callers see a stable order.
    pub fn branch_logs(&self) -> Result<Vec<BranchLog>> {
        let heads = self.git_dir.join("logs").join("refs").join("heads");
        let mut logs = Vec::new();
        if !heads.is_dir() {
            return Ok(logs);
        }

        for entry in WalkDir::new(&heads) {
            let entry = entry.context("walking branch logs")?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry
                .path()
                .strip_prefix(&heads)
                .context("log path outside heads directory")?
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            logs.push(BranchLog {
                name,
                path: entry.path().to_path_buf(),
            });
        }

        logs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(logs)
    }

    /// Read a branch's raw log text.
    pub fn read_log(&self, log: &BranchLog) -> Result<String> {
        fs::read_to_string(&log.path).with_context(|| format!("reading reflog for {}", log.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture_repo() -> Result<TempDir> {
        let dir = TempDir::new()?;
        let heads = dir.path().join(".git/logs/refs/heads");
        fs::create_dir_all(heads.join("feature"))?;
        fs::write(
            heads.join("main"),
            "aaa bbb jan <j@e> 1700000000 +0000\tcommit: one\n",
        )?;
        fs::write(
            heads.join("feature/parser"),
            "bbb ccc jan <j@e> 1700000100 +0000\tbranch: Created from main\n",
        )?;
        Ok(dir)
    }

    #[test]
    fn test_discover_requires_git_dir() {
        let dir = TempDir::new().unwrap();
        assert!(LogStore::discover(dir.path()).is_err());
    }

    #[test]
    fn test_branch_logs_are_sorted_and_nested() -> Result<()> {
        let dir = fixture_repo()?;
        let store = LogStore::discover(dir.path())?;
        let logs = store.branch_logs()?;

        let names: Vec<&str> = logs.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["feature/parser", "main"]);
        Ok(())
    }

    #[test]
    fn test_read_log_returns_contents() -> Result<()> {
        let dir = fixture_repo()?;
        let store = LogStore::discover(dir.path())?;
        let logs = store.branch_logs()?;
        let main = logs.iter().find(|l| l.name == "main").unwrap();

        let text = store.read_log(main)?;
        assert!(text.starts_with("aaa bbb"));
        Ok(())
    }

    #[test]
    fn test_missing_heads_dir_yields_no_logs() -> Result<()> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join(".git"))?;
        let store = LogStore::discover(dir.path())?;
        assert!(store.branch_logs()?.is_empty());
        Ok(())
    }
}
