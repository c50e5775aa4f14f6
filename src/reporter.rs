//! # Crash Reporter
//!
//! Drives the fatal-error path: capture, consent, compose, submit, exit.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use crate::{
    boundary::{CaughtError, Failure},
    compose::{EditorFactory, ReportComposer},
    config::ConfigStore,
    consent::ConsentController,
    console::Console,
    constants::CRASH_EXIT_CODE,
    error::{ReportError, Result},
    event::{CrashEvent, RuntimeInfo},
    preference::PreferenceStore,
    stack,
    submit::{IssueTracker, Submitter},
};

/// The crash-report pipeline and its collaborators.
pub struct CrashReporter {
    preferences: PreferenceStore,
    editor: Box<dyn EditorFactory>,
    tracker: Box<dyn IssueTracker>,
    console: Console,
}

impl CrashReporter {
    pub fn new(
        preferences: PreferenceStore,
        editor: Box<dyn EditorFactory>,
        tracker: Box<dyn IssueTracker>,
        console: Console,
    ) -> Self {
        Self {
            preferences,
            editor,
            tracker,
            console,
        }
    }

    /// Reporter for a real process: `HUB_REPORT_CRASH` and standard streams.
    pub fn from_env(
        config: Box<dyn ConfigStore>,
        editor: Box<dyn EditorFactory>,
        tracker: Box<dyn IssueTracker>,
    ) -> Self {
        Self::new(
            PreferenceStore::from_env(config),
            editor,
            tracker,
            Console::stdio(),
        )
    }

    /// Handles `failure` and terminates the process with status 1.
    ///
    /// Returns normally only when the failure is not reportable.
    pub fn capture_crash(mut self, failure: Failure) {
        if let Some(code) = self.handle(failure) {
            std::process::exit(code);
        }
    }

    /// Runs the crash flow and returns the exit status the process must end
    /// with, or `None` when the failure is ignored.
    pub fn handle(&mut self, failure: Failure) -> Option<i32> {
        let Some(caught) = failure.normalize() else {
            tracing::debug!("ignoring failure that is neither an error nor a message");
            return None;
        };

        self.report_crash(caught);
        Some(CRASH_EXIT_CODE)
    }

    fn report_crash(&mut self, caught: CaughtError) {
        let stack = match caught.stack {
            Some(stack) => stack,
            None => stack::capture(),
        };
        let event = CrashEvent::new(caught.error, caught.type_name, stack, RuntimeInfo::current());

        if let Err(err) = self.run(&event) {
            self.console.print_failure(&err.to_string());
        }
    }

    fn run(&mut self, event: &CrashEvent) -> Result<()> {
        let consent = ConsentController::new(&self.preferences, &mut self.console).decide(event)?;

        if consent.report {
            let document = ReportComposer::new(self.editor.as_ref()).compose(event)?;
            Submitter::new(self.tracker.as_ref()).submit(&document, &mut self.console)?;
        }

        if let Some(preference) = consent.remember {
            self.preferences
                .set(preference)
                .map_err(ReportError::Preference)?;
        }

        Ok(())
    }
}
