//! # GitHub CLI Tracker
//!
//! Files issues by delegating to the `gh` command, which owns authentication
//! and the API client.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::process::Command;

use anyhow::{Context, Result};

use crate::submit::{CreatedIssue, IssueTracker, Project};

/// Issue tracker backed by `gh issue create`.
#[derive(Debug, Clone)]
pub struct GhCliTracker {
    program: String,
}

impl GhCliTracker {
    pub fn new() -> Self {
        Self::with_program("gh")
    }

    /// Uses `program` instead of `gh` from `$PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(project: &Project, title: &str, body: &str, labels: &[&str]) -> Vec<String> {
        let mut args = vec![
            "issue".to_string(),
            "create".to_string(),
            "--repo".to_string(),
            format!("{}/{}/{}", project.host, project.owner, project.name),
            "--title".to_string(),
            title.to_string(),
            "--body".to_string(),
            body.to_string(),
        ];
        for label in labels {
            args.push("--label".to_string());
            args.push((*label).to_string());
        }
        args
    }
}

impl Default for GhCliTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueTracker for GhCliTracker {
    fn create_issue(
        &self,
        project: &Project,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> Result<CreatedIssue> {
        let output = Command::new(&self.program)
            .args(Self::args(project, title, body, labels))
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} issue create failed: {}",
                self.program,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let url = stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .with_context(|| format!("{} did not print the issue URL", self.program))?;

        Ok(CreatedIssue {
            html_url: url.to_string(),
        })
    }
}
