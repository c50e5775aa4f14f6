//! # Report Composition
//!
//! Builds the crash report text and hands it to the user's editor.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use anyhow::Result;

use crate::{
    constants::{EDITOR_FILENAME_HINT, EDITOR_SUBJECT_HINT, PROJECT_NAME, PROJECT_OWNER},
    error::ReportError,
    event::CrashEvent,
};

/// A report ready to be filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub body: String,
}

/// Opens edit sessions on a proposed message.
pub trait EditorFactory {
    /// Starts a session. `filename_hint` names the scratch artifact and
    /// `subject_hint` describes what is being edited.
    fn open(
        &self,
        filename_hint: &str,
        subject_hint: &str,
        message: &str,
    ) -> Result<Box<dyn EditSession>>;
}

/// One interactive edit of a title + body message.
pub trait EditSession {
    /// Lets the user edit the message and returns `(title, body)`.
    fn edit_title_and_body(&mut self) -> Result<(String, String)>;

    /// Releases the scratch artifact.
    fn delete_file(&mut self) -> Result<()>;
}

/// Builds the proposed report message for `event`.
pub fn report_message(event: &CrashEvent) -> String {
    let error = event.error();
    format!(
        "Crash report - {error}\n\n\
Error ({type_name}): `{error}`\n\n\
Stack:\n\n```\n{stack}\n```\n\n\
Runtime:\n\n```\n{runtime}\n```\n\n\n\
# Creating crash report:\n\
#\n\
# This information will be posted as a new issue under {PROJECT_OWNER}/{PROJECT_NAME}.\n\
# We're NOT including any information about the command that you were executing,\n\
# but knowing a little bit more about it would really help us to solve this problem.\n\
# Please review the text and remove anything you consider private before saving.\n\
# Feel free to modify the title and the description for this issue.\n",
        type_name = event.type_name(),
        stack = event.stack(),
        runtime = event.runtime(),
    )
}

/// Turns a crash event into an edited [`ReportDocument`].
pub struct ReportComposer<'a> {
    editor: &'a dyn EditorFactory,
}

impl<'a> ReportComposer<'a> {
    pub fn new(editor: &'a dyn EditorFactory) -> Self {
        Self { editor }
    }

    /// Composes the report and lets the user edit it.
    ///
    /// The editor's scratch artifact is deleted before returning, whether or
    /// not the edit succeeded.
    pub fn compose(&self, event: &CrashEvent) -> Result<ReportDocument, ReportError> {
        let message = report_message(event);

        let mut session = self
            .editor
            .open(EDITOR_FILENAME_HINT, EDITOR_SUBJECT_HINT, &message)
            .map_err(ReportError::Composition)?;

        let edited = session.edit_title_and_body();

        if let Err(err) = session.delete_file() {
            tracing::warn!("could not delete crash report scratch file: {err:#}");
        }

        let (title, body) = edited.map_err(ReportError::Composition)?;
        Ok(ReportDocument { title, body })
    }
}
