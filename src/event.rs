//! # Crash Event
//!
//! The immutable snapshot of one fatal error.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::fmt;

/// Operating system and architecture of the crashed process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub os: String,
    pub arch: String,
}

impl RuntimeInfo {
    /// Runtime identifiers of the current process.
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OS: {}\nArch: {}", self.os, self.arch)
    }
}

/// A captured fatal error with its stack and runtime context.
#[derive(Debug)]
pub struct CrashEvent {
    error: anyhow::Error,
    type_name: &'static str,
    stack: String,
    runtime: RuntimeInfo,
}

impl CrashEvent {
    pub const fn new(
        error: anyhow::Error,
        type_name: &'static str,
        stack: String,
        runtime: RuntimeInfo,
    ) -> Self {
        Self {
            error,
            type_name,
            stack,
            runtime,
        }
    }

    pub const fn error(&self) -> &anyhow::Error {
        &self.error
    }

    /// Name of the error's concrete type, kept for triage.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    pub const fn runtime(&self) -> &RuntimeInfo {
        &self.runtime
    }
}
