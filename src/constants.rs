//! # Constants
//!
//! Centralized constants for the fixed names and values used by the crash reporter.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

// =============================================================================
// Preference
// =============================================================================

/// Environment variable overriding the persisted preference for one invocation.
pub const REPORT_CRASH_ENV: &str = "HUB_REPORT_CRASH";

/// Global configuration key holding the persisted preference.
pub const REPORT_CRASH_CONFIG_KEY: &str = "hub.reportCrash";

// =============================================================================
// Upstream Project
// =============================================================================

/// Owner of the project crash reports are filed against.
pub const PROJECT_OWNER: &str = "github";

/// Name of the project crash reports are filed against.
pub const PROJECT_NAME: &str = "hub";

/// Host of the project crash reports are filed against.
pub const PROJECT_HOST: &str = "github.com";

/// Label attached to every crash report issue.
pub const CRASH_REPORT_LABEL: &str = "Crash Report";

// =============================================================================
// Capture
// =============================================================================

/// Upper bound for a raw stack capture, in bytes. Anything beyond is dropped.
pub const STACK_BUFFER_SIZE: usize = 10_000;

// =============================================================================
// Interaction
// =============================================================================

/// Question shown when no preference is stored.
pub const CONSENT_PROMPT: &str = "Would you like to open an issue? ([Y]es/[N]o/[A]lways/N[e]ver): ";

/// File name hint handed to the editor for the scratch report.
pub const EDITOR_FILENAME_HINT: &str = "CRASH_REPORT";

/// Subject hint handed to the editor.
pub const EDITOR_SUBJECT_HINT: &str = "crash report";

/// Fallback editor when neither `$VISUAL` nor `$EDITOR` is set.
pub const DEFAULT_EDITOR: &str = "vi";

/// Exit status of every crash flow that actually runs.
pub const CRASH_EXIT_CODE: i32 = 1;

// =============================================================================
// File System
// =============================================================================

/// Global configuration directory name (inside `~/.config`).
pub const GLOBAL_CONFIG_DIR: &str = "hubcrash";

/// Global configuration file name (inside `GLOBAL_CONFIG_DIR`).
pub const GLOBAL_CONFIG_FILENAME: &str = "config";

/// Environment variable holding the log filter for the binary.
pub const LOG_ENV: &str = "HUBCRASH_LOG";

/// Environment variable naming the `gh` executable used to file issues.
pub const GH_PROGRAM_ENV: &str = "HUBCRASH_GH";
