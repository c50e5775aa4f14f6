//! # Configuration
//!
//! The key/value configuration collaborator the preference is persisted in,
//! plus its backends: global git config and a TOML file.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod file;
pub mod git;

use std::collections::BTreeMap;

use anyhow::Result;

pub use self::{
    file::{set_home_override, FileConfig},
    git::GitConfig,
};

/// Global key/value configuration storage.
pub trait ConfigStore {
    /// Reads `key`. A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory configuration, for embedding hosts without persistent storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    values: BTreeMap<String, String>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
