//! # Report Preference
//!
//! The persisted tri-state answer to "should crashes be reported?".
//!
//! Resolution order:
//! 1. `HUB_REPORT_CRASH`, when set and non-empty (taken verbatim)
//! 2. `hub.reportCrash` in the global configuration
//! 3. Unset
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::fmt;

use anyhow::Result;

use crate::{
    config::ConfigStore,
    constants::{REPORT_CRASH_CONFIG_KEY, REPORT_CRASH_ENV},
};

/// Whether crashes are reported without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPreference {
    Always,
    Never,
    Unset,
}

impl ReportPreference {
    /// Interprets a raw mode string. Anything but `always`/`never` is Unset.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "always" => Self::Always,
            "never" => Self::Never,
            _ => Self::Unset,
        }
    }

    /// The string persisted in configuration, `None` for Unset.
    pub const fn as_config_value(self) -> Option<&'static str> {
        match self {
            Self::Always => Some("always"),
            Self::Never => Some("never"),
            Self::Unset => None,
        }
    }
}

impl fmt::Display for ReportPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_config_value().unwrap_or("unset"))
    }
}

/// Where a resolved preference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceSource {
    Environment,
    Config,
    Default,
}

impl fmt::Display for PreferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "${REPORT_CRASH_ENV}"),
            Self::Config => write!(f, "config {REPORT_CRASH_CONFIG_KEY}"),
            Self::Default => f.write_str("default"),
        }
    }
}

/// A raw preference string with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub raw: String,
    pub source: PreferenceSource,
}

impl Resolved {
    pub fn preference(&self) -> ReportPreference {
        ReportPreference::from_raw(&self.raw)
    }
}

/// Preference backed by a configuration store plus the environment override.
pub struct PreferenceStore {
    config: Box<dyn ConfigStore>,
    env_override: Option<String>,
}

impl PreferenceStore {
    /// Creates a store with an explicit override value (`None` = variable unset).
    pub fn new(config: Box<dyn ConfigStore>, env_override: Option<String>) -> Self {
        Self {
            config,
            env_override,
        }
    }

    /// Creates a store reading the override from `HUB_REPORT_CRASH`.
    pub fn from_env(config: Box<dyn ConfigStore>) -> Self {
        Self::new(config, std::env::var(REPORT_CRASH_ENV).ok())
    }

    pub fn get(&self) -> ReportPreference {
        self.resolve().preference()
    }

    /// Resolves the raw mode string and where it came from.
    ///
    /// A configuration read error counts as unset.
    pub fn resolve(&self) -> Resolved {
        if let Some(raw) = self.env_override.as_deref().filter(|v| !v.is_empty()) {
            tracing::debug!(raw = %raw, "crash report preference from environment");
            return Resolved {
                raw: raw.to_string(),
                source: PreferenceSource::Environment,
            };
        }

        match self.config.get(REPORT_CRASH_CONFIG_KEY) {
            Ok(Some(raw)) => {
                tracing::debug!(raw = %raw, "crash report preference from config");
                Resolved {
                    raw,
                    source: PreferenceSource::Config,
                }
            }
            Ok(None) => Resolved {
                raw: String::new(),
                source: PreferenceSource::Default,
            },
            Err(err) => {
                tracing::debug!("could not read {REPORT_CRASH_CONFIG_KEY}: {err:#}");
                Resolved {
                    raw: String::new(),
                    source: PreferenceSource::Default,
                }
            }
        }
    }

    /// Persists `preference` under `hub.reportCrash`. The environment is never touched.
    pub fn set(&mut self, preference: ReportPreference) -> Result<()> {
        let Some(value) = preference.as_config_value() else {
            anyhow::bail!("Cannot persist an unset preference");
        };

        tracing::debug!(value, "saving crash report preference");
        self.config.set(REPORT_CRASH_CONFIG_KEY, value)
    }
}
