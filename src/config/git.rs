//! # Git Config Backend
//!
//! Stores configuration in the user's global git config
//! (`git config --global`).
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::{Context, Result};

use super::ConfigStore;

/// Exit status of `git config --get` when the key is not set.
const GIT_CONFIG_KEY_MISSING: i32 = 1;

/// Global git configuration.
#[derive(Debug, Clone, Default)]
pub struct GitConfig {
    /// Overrides `$HOME` for the git process (where `~/.gitconfig` lives)
    home: Option<PathBuf>,
}

impl GitConfig {
    pub const fn new() -> Self {
        Self { home: None }
    }

    /// Reads and writes the global config under `home` instead of `$HOME`.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Checks whether a `git` executable can be run.
    pub fn is_available() -> bool {
        Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(home) = &self.home {
            cmd.env("HOME", home)
                .env_remove("XDG_CONFIG_HOME")
                .env_remove("GIT_CONFIG_GLOBAL");
        }
        cmd.args(["config", "--global"]);
        cmd
    }
}

impl ConfigStore for GitConfig {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let output = self
            .command()
            .args(["--get", key])
            .output()
            .context("Failed to execute git config")?;

        if output.status.code() == Some(GIT_CONFIG_KEY_MISSING) {
            return Ok(None);
        }

        if !output.status.success() {
            anyhow::bail!(
                "git config --get {key} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let output = self
            .command()
            .args([key, value])
            .output()
            .context("Failed to execute git config")?;

        if !output.status.success() {
            anyhow::bail!(
                "git config {key} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_get_missing_key() {
        if !GitConfig::is_available() {
            return;
        }
        let home = tempdir().unwrap();
        let config = GitConfig::with_home(home.path());

        assert_eq!(config.get("hub.reportCrash").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        if !GitConfig::is_available() {
            return;
        }
        let home = tempdir().unwrap();
        let mut config = GitConfig::with_home(home.path());

        config.set("hub.reportCrash", "always").unwrap();

        assert_eq!(
            config.get("hub.reportCrash").unwrap().as_deref(),
            Some("always")
        );
        assert!(home.path().join(".gitconfig").exists());
    }
}
