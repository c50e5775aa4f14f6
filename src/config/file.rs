//! # File Config Backend
//!
//! Stores configuration in a TOML file at `~/.config/hubcrash/config`.
//! Dotted keys map to nested tables: `hub.reportCrash = "always"` is written as
//!
//! ```toml
//! [hub]
//! reportCrash = "always"
//! ```
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{cell::RefCell, fs, path::PathBuf};

use anyhow::{Context, Result};

use super::ConfigStore;
use crate::constants::{GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILENAME};

thread_local! {
    /// Thread-local override for the home directory path.
    /// Used by tests to redirect config to a temp directory
    /// without modifying environment variables.
    static HOME_OVERRIDE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Sets a thread-local override for the home directory.
pub fn set_home_override(path: Option<PathBuf>) {
    HOME_OVERRIDE.with(|cell| {
        *cell.borrow_mut() = path;
    });
}

fn get_home_override() -> Option<PathBuf> {
    HOME_OVERRIDE.with(|cell| cell.borrow().clone())
}

/// TOML-file configuration.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    /// Opens the global config file (~/.config/hubcrash/config).
    ///
    /// Checks for a thread-local home override first (used by tests).
    pub fn global() -> Result<Self> {
        let home = get_home_override()
            .or_else(dirs::home_dir)
            .context("Could not determine home directory")?;

        Ok(Self::at(
            home.join(".config")
                .join(GLOBAL_CONFIG_DIR)
                .join(GLOBAL_CONFIG_FILENAME),
        ))
    }

    /// Uses the file at `path`. It is created on the first write.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Result<toml::Table> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config: {}", self.path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", self.path.display()))
    }

    fn save(&self, table: &toml::Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(table).context("Failed to serialize config")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config: {}", self.path.display()))
    }
}

impl ConfigStore for FileConfig {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let table = self.load()?;

        let mut parts = key.split('.');
        let mut value = parts.next().and_then(|first| table.get(first));
        for part in parts {
            value = value.and_then(|v| v.as_table()).and_then(|t| t.get(part));
        }

        Ok(value.map(|v| {
            v.as_str()
                .map_or_else(|| v.to_string(), ToString::to_string)
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut table = self.load()?;

        let mut parts: Vec<&str> = key.split('.').collect();
        let Some(leaf) = parts.pop() else {
            anyhow::bail!("Empty config key");
        };

        let mut current = &mut table;
        for part in parts {
            let entry = current
                .entry(part)
                .or_insert(toml::Value::Table(toml::Table::new()));
            current = entry
                .as_table_mut()
                .with_context(|| format!("Config key '{part}' is not a section"))?;
        }
        current.insert(leaf.to_string(), toml::Value::String(value.to_string()));

        self.save(&table)
    }
}
