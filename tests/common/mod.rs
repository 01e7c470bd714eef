use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory with an isolated diffcheck environment
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.file(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// `diffcheck` running inside the workspace, ignoring any user or
    /// project configuration and with colors off
    pub fn diffcheck(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("diffcheck")?;
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("DIFFCHECK_CONFIG_PATH", self.path().join("no-config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}
