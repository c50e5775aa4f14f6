//! # hubcrash
//!
//! Post-mortem crash reporting for command-line tools.
//!
//! When the host CLI fails fatally, the crash reporter prints the error and
//! its stack, asks whether to report it (or follows the stored preference),
//! lets the user edit the report in their editor, files it as an issue on the
//! upstream project and exits with status 1.
//!
//! ## Features
//!
//! - **Failure Boundary**: Errors and panics from the host dispatch end up in one place
//! - **Clean Stacks**: Capture machinery frames are stripped from the trace
//! - **Remembered Consent**: `always`/`never` answers are persisted in global config
//! - **Pluggable Collaborators**: Config store, editor and issue tracker are traits
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod boundary;
pub mod compose;
pub mod config;
pub mod consent;
pub mod console;
pub mod constants;
pub mod editor;
pub mod error;
pub mod event;
pub mod preference;
pub mod reporter;
pub mod stack;
pub mod submit;
pub mod tracker;

pub use boundary::{guard, guard_typed, Failure};
pub use config::{set_home_override, ConfigStore};
pub use error::ReportError;
pub use preference::{PreferenceStore, ReportPreference};
pub use reporter::CrashReporter;
