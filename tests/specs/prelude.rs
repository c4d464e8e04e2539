//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::Path;

/// Verdict a collaborator script can `cat` to pass its gate
pub const PASS_VERDICT: &str = r#"{"status":"passed","handoff":{"ok":true}}"#;

/// Temporary project directory holding plan and collaborator fixtures
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parent dirs
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// A `gw` command rooted in this project
    pub fn gw(&self) -> Command {
        let mut cmd = Command::cargo_bin("gw").unwrap();
        cmd.current_dir(self.path());
        cmd
    }
}
