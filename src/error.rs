//! # Errors
//!
//! Typed failures of the crash-report flow.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use thiserror::Error;

/// Failure of one step of the report flow.
///
/// Every variant aborts the remaining flow; none is retried.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The editor collaborator could not produce a document
    #[error("could not compose crash report: {0:#}")]
    Composition(anyhow::Error),

    /// The issue tracker rejected or could not complete the request
    #[error("could not submit crash report: {0:#}")]
    Submission(anyhow::Error),

    /// The preference could not be persisted
    #[error("could not save crash report preference: {0:#}")]
    Preference(anyhow::Error),

    /// Reading the answer or writing to the terminal failed
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

/// A string-valued failure (e.g. a `panic!("...")` message) promoted to an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PanicMessage(pub String);

/// Result type alias for the report flow.
pub type Result<T> = std::result::Result<T, ReportError>;
