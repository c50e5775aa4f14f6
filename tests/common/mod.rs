//! # Test Helpers
//!
//! Fake collaborators and a scenario runner for driving the crash reporter
//! without a terminal, an editor, git or the network.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    io::{self, Cursor, Write},
    rc::Rc,
};

use anyhow::Result;
use hubcrash::{
    compose::{EditSession, EditorFactory},
    config::{ConfigStore, MemoryConfig},
    console::Console,
    constants::REPORT_CRASH_CONFIG_KEY,
    submit::{CreatedIssue, IssueTracker, Project},
    CrashReporter, Failure, PreferenceStore,
};

// =============================================================================
// Output Capture
// =============================================================================

/// A `Write` sink that can be read back after being boxed into a `Console`.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console reading `input` and writing into the returned buffers.
pub fn console(input: &str) -> (Console, SharedBuffer, SharedBuffer) {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let console = Console::new(
        Box::new(Cursor::new(input.to_string())),
        Box::new(out.clone()),
        Box::new(err.clone()),
    );
    (console, out, err)
}

// =============================================================================
// Config
// =============================================================================

/// In-memory config that counts writes.
#[derive(Clone, Default)]
pub struct SharedConfig {
    values: Rc<RefCell<MemoryConfig>>,
    writes: Rc<RefCell<usize>>,
    fail_writes: bool,
}

impl SharedConfig {
    pub fn with_value(key: &str, value: &str) -> Self {
        let config = Self::default();
        config.values.borrow_mut().set(key, value).unwrap();
        config
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).unwrap()
    }

    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl ConfigStore for SharedConfig {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.values.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("config is read-only");
        }
        *self.writes.borrow_mut() += 1;
        self.values.borrow_mut().set(key, value)
    }
}

// =============================================================================
// Editor
// =============================================================================

/// How the fake editor behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorBehavior {
    /// Returns the proposed message split into title and body
    #[default]
    Accept,
    /// Replaces the title
    Retitle(&'static str),
    /// Cannot create its scratch file
    FailOpen,
    /// Editor exits with an error
    FailEdit,
}

#[derive(Debug, Default)]
pub struct EditorLog {
    /// (filename hint, subject hint, message) of every opened session
    pub opened: Vec<(String, String, String)>,
    pub edits: usize,
    pub cleanups: usize,
}

#[derive(Clone, Default)]
pub struct FakeEditor {
    pub behavior: EditorBehavior,
    pub log: Rc<RefCell<EditorLog>>,
}

struct FakeSession {
    behavior: EditorBehavior,
    message: String,
    log: Rc<RefCell<EditorLog>>,
}

impl EditorFactory for FakeEditor {
    fn open(
        &self,
        filename_hint: &str,
        subject_hint: &str,
        message: &str,
    ) -> Result<Box<dyn EditSession>> {
        if self.behavior == EditorBehavior::FailOpen {
            anyhow::bail!("could not create scratch file");
        }
        self.log.borrow_mut().opened.push((
            filename_hint.to_string(),
            subject_hint.to_string(),
            message.to_string(),
        ));
        Ok(Box::new(FakeSession {
            behavior: self.behavior,
            message: message.to_string(),
            log: Rc::clone(&self.log),
        }))
    }
}

impl EditSession for FakeSession {
    fn edit_title_and_body(&mut self) -> Result<(String, String)> {
        self.log.borrow_mut().edits += 1;
        if self.behavior == EditorBehavior::FailEdit {
            anyhow::bail!("editor exited with status 1");
        }
        let (title, body) = self
            .message
            .split_once("\n\n")
            .unwrap_or((self.message.as_str(), ""));
        let title = match self.behavior {
            EditorBehavior::Retitle(title) => title.to_string(),
            _ => title.to_string(),
        };
        Ok((title, body.to_string()))
    }

    fn delete_file(&mut self) -> Result<()> {
        self.log.borrow_mut().cleanups += 1;
        Ok(())
    }
}

// =============================================================================
// Issue Tracker
// =============================================================================

/// A recorded `create_issue` call.
#[derive(Debug, Clone)]
pub struct Submission {
    pub project: Project,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeTracker {
    pub fail: bool,
    pub submissions: Rc<RefCell<Vec<Submission>>>,
}

impl IssueTracker for FakeTracker {
    fn create_issue(
        &self,
        project: &Project,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> Result<CreatedIssue> {
        self.submissions.borrow_mut().push(Submission {
            project: project.clone(),
            title: title.to_string(),
            body: body.to_string(),
            labels: labels.iter().map(ToString::to_string).collect(),
        });
        if self.fail {
            anyhow::bail!("401 Bad credentials");
        }
        let number = self.submissions.borrow().len();
        Ok(CreatedIssue {
            html_url: format!("https://github.com/{project}/issues/{number}"),
        })
    }
}

// =============================================================================
// Scenario Runner
// =============================================================================

/// Inputs of one crash.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    /// Persisted `hub.reportCrash`
    pub stored: Option<&'static str>,
    /// `HUB_REPORT_CRASH`
    pub env: Option<&'static str>,
    /// Standard input
    pub input: &'static str,
    pub editor: EditorBehavior,
    pub tracker_fails: bool,
    pub config_read_only: bool,
}

/// Observable effects of one crash.
#[derive(Debug)]
pub struct Outcome {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub submissions: Vec<Submission>,
    pub stored: Option<String>,
    pub config_writes: usize,
    pub editor: EditorLog,
}

impl Outcome {
    pub fn prompted(&self) -> bool {
        self.stdout.contains("Would you like to open an issue?")
    }
}

impl Scenario {
    pub fn run(&self, failure: Failure) -> Outcome {
        let mut config = self
            .stored
            .map_or_else(SharedConfig::default, |value| {
                SharedConfig::with_value(REPORT_CRASH_CONFIG_KEY, value)
            });
        config.fail_writes = self.config_read_only;

        let editor = FakeEditor {
            behavior: self.editor,
            ..FakeEditor::default()
        };
        let tracker = FakeTracker {
            fail: self.tracker_fails,
            ..FakeTracker::default()
        };
        let (console, out, err) = console(self.input);

        let preferences =
            PreferenceStore::new(Box::new(config.clone()), self.env.map(ToString::to_string));
        let mut reporter = CrashReporter::new(
            preferences,
            Box::new(editor.clone()),
            Box::new(tracker.clone()),
            console,
        );

        let exit_code = reporter.handle(failure);
        drop(reporter);

        let submissions = tracker.submissions.borrow().clone();
        let editor_log = editor.log.take();

        Outcome {
            exit_code,
            stdout: out.text(),
            stderr: err.text(),
            submissions,
            stored: config.value(REPORT_CRASH_CONFIG_KEY),
            config_writes: config.writes(),
            editor: editor_log,
        }
    }
}

/// A typical fatal error.
pub fn crash() -> Failure {
    Failure::from(anyhow::anyhow!("invalid remote URL: git@github.com"))
}
