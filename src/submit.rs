//! # Submission
//!
//! Files the composed report as a new issue on the upstream project.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::fmt;

use anyhow::Result;

use crate::{
    compose::ReportDocument,
    console::Console,
    constants::{CRASH_REPORT_LABEL, PROJECT_HOST, PROJECT_NAME, PROJECT_OWNER},
    error::ReportError,
};

/// A repository on an issue-tracker host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub owner: String,
    pub name: String,
    pub host: String,
}

impl Project {
    pub fn new(owner: &str, name: &str, host: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            host: host.to_string(),
        }
    }

    /// The project crash reports are filed against.
    pub fn upstream() -> Self {
        Self::new(PROJECT_OWNER, PROJECT_NAME, PROJECT_HOST)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A created issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Canonical web URL of the issue
    pub html_url: String,
}

/// Creates issues on an issue tracker.
pub trait IssueTracker {
    fn create_issue(
        &self,
        project: &Project,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> Result<CreatedIssue>;
}

/// Reference to the filed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub url: String,
}

/// Sends reports to the upstream project.
pub struct Submitter<'a> {
    tracker: &'a dyn IssueTracker,
    project: Project,
}

impl<'a> Submitter<'a> {
    pub fn new(tracker: &'a dyn IssueTracker) -> Self {
        Self {
            tracker,
            project: Project::upstream(),
        }
    }

    /// Creates the issue, labelled as a crash report, and prints its URL.
    pub fn submit(
        &self,
        document: &ReportDocument,
        console: &mut Console,
    ) -> Result<SubmissionResult, ReportError> {
        tracing::debug!(project = %self.project, "submitting crash report");

        let issue = self
            .tracker
            .create_issue(
                &self.project,
                &document.title,
                &document.body,
                &[CRASH_REPORT_LABEL],
            )
            .map_err(ReportError::Submission)?;

        console.println(&issue.html_url)?;

        Ok(SubmissionResult {
            url: issue.html_url,
        })
    }
}
