//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::{fs, path::Path};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch workspace with an empty config file, so the user's own
/// configuration never leaks into a test run.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stache.toml"), "").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `body` to `rel`, creating parent directories.
    pub fn file(&self, rel: &str, body: &str) -> &Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, body).unwrap();
        self
    }

    /// `stache --config <ws>/stache.toml`, run inside the workspace.
    pub fn stache(&self) -> Command {
        let mut cmd = Command::cargo_bin("stache").unwrap();
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("STACHE_CONFIG")
            .env_remove("STACHE__OUTPUT__HANDLER")
            .env_remove("STACHE__TEMPLATES__DIRS")
            .env_remove("STACHE__TEMPLATES__MODULE")
            .arg("--config")
            .arg(self.path().join("stache.toml"));
        cmd
    }
}
