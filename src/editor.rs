//! # Editor Integration
//!
//! Edits a proposed message in the user's preferred editor through a scratch
//! file, git-commit style: lines starting with `#` are comments, the first
//! paragraph is the title and the rest is the body.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    fs,
    io::{IsTerminal, Write},
    path::Path,
    process::Command,
};

use anyhow::{Context, Result};
use tempfile::TempPath;

use crate::{
    compose::{EditSession, EditorFactory},
    constants::DEFAULT_EDITOR,
};

/// Opens scratch-file edit sessions in an external editor.
#[derive(Debug, Clone)]
pub struct ScratchEditor {
    command: Option<String>,
    interactive: bool,
}

impl ScratchEditor {
    /// Editor from the environment. The editor is only launched if stdout is
    /// a terminal; otherwise the proposed message is used as-is.
    pub fn new() -> Self {
        Self {
            command: None,
            interactive: std::io::stdout().is_terminal(),
        }
    }

    /// Always launches `command` (e.g. `"code --wait"`).
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            interactive: true,
        }
    }

    /// The editor command, determined by (in order of priority):
    /// 1. the explicit command
    /// 2. `$VISUAL` environment variable
    /// 3. `$EDITOR` environment variable
    /// 4. Fallback to `vi`
    fn command(&self) -> String {
        self.command
            .clone()
            .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.is_empty()))
            .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }
}

impl Default for ScratchEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorFactory for ScratchEditor {
    fn open(
        &self,
        filename_hint: &str,
        subject_hint: &str,
        message: &str,
    ) -> Result<Box<dyn EditSession>> {
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{filename_hint}-"))
            .suffix(".md")
            .tempfile()
            .context("Failed to create scratch file")?;

        file.write_all(message.as_bytes())
            .and_then(|()| file.flush())
            .with_context(|| format!("Failed to write {subject_hint}"))?;

        Ok(Box::new(ScratchSession {
            path: Some(file.into_temp_path()),
            command: self.interactive.then(|| self.command()),
            subject: subject_hint.to_string(),
        }))
    }
}

/// One edit of a scratch file.
struct ScratchSession {
    path: Option<TempPath>,
    /// Editor to launch, `None` when not interactive
    command: Option<String>,
    subject: String,
}

impl EditSession for ScratchSession {
    fn edit_title_and_body(&mut self) -> Result<(String, String)> {
        let path = self.path.as_ref().context("Scratch file already deleted")?;

        if let Some(command) = &self.command {
            launch(command, path)?;
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", self.subject))?;

        parse_title_and_body(&content)
            .with_context(|| format!("Aborting {}", self.subject))
    }

    fn delete_file(&mut self) -> Result<()> {
        if let Some(path) = self.path.take() {
            path.close().context("Failed to delete scratch file")?;
        }
        Ok(())
    }
}

fn launch(editor: &str, path: &Path) -> Result<()> {
    // Split editor command in case it has arguments (e.g., "code --wait")
    let parts = shlex::split(editor).with_context(|| format!("Invalid editor command: {editor}"))?;
    let (program, args) = parts.split_first().context("Empty editor command")?;

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor: {editor}"))?;

    if !status.success() {
        anyhow::bail!("Editor exited with error: {status}");
    }

    Ok(())
}

/// Splits edited text into title and body.
///
/// Comment lines are dropped; the title is the first paragraph joined into
/// one line, the body is everything after it.
pub fn parse_title_and_body(content: &str) -> Result<(String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect();

    let mut rest = lines.iter().skip_while(|line| line.trim().is_empty());

    let title = rest
        .by_ref()
        .take_while(|line| !line.trim().is_empty())
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        anyhow::bail!("empty title");
    }

    let body = rest.copied().collect::<Vec<_>>().join("\n").trim().to_string();

    Ok((title, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_and_body() {
        let (title, body) =
            parse_title_and_body("Crash report - boom\n\nError: `boom`\n\nStack:\n").unwrap();
        assert_eq!(title, "Crash report - boom");
        assert_eq!(body, "Error: `boom`\n\nStack:");
    }

    #[test]
    fn test_parse_strips_comments() {
        let content = "# leading comment\n\nTitle\n\nBody line\n# trailing\n# comment\n";
        let (title, body) = parse_title_and_body(content).unwrap();
        assert_eq!(title, "Title");
        assert_eq!(body, "Body line");
    }

    #[test]
    fn test_parse_multiline_title() {
        let (title, body) = parse_title_and_body("First part\nsecond part\n\nbody").unwrap();
        assert_eq!(title, "First part second part");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_empty_title_fails() {
        assert!(parse_title_and_body("# only comments\n#\n\n").is_err());
        assert!(parse_title_and_body("").is_err());
    }

    #[test]
    fn test_session_without_terminal_keeps_message() {
        let editor = ScratchEditor {
            command: None,
            interactive: false,
        };
        let mut session = editor.open("CRASH_REPORT", "crash report", "Title\n\nBody\n").unwrap();

        let (title, body) = session.edit_title_and_body().unwrap();
        assert_eq!(title, "Title");
        assert_eq!(body, "Body");

        session.delete_file().unwrap();
        assert!(session.edit_title_and_body().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_runs_editor_command() {
        let editor = ScratchEditor::with_command("sh -c 'printf \"Edited title\\n\\nEdited body\\n\" > \"$0\"'");
        let mut session = editor.open("CRASH_REPORT", "crash report", "Title\n\nBody\n").unwrap();

        let (title, body) = session.edit_title_and_body().unwrap();
        assert_eq!(title, "Edited title");
        assert_eq!(body, "Edited body");

        session.delete_file().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_session_editor_failure() {
        let editor = ScratchEditor::with_command("false");
        let mut session = editor.open("CRASH_REPORT", "crash report", "Title\n").unwrap();

        assert!(session.edit_title_and_body().is_err());
        session.delete_file().unwrap();
    }

    #[test]
    fn test_delete_file_removes_scratch() {
        let file = tempfile::Builder::new()
            .prefix("CRASH_REPORT-")
            .tempfile()
            .unwrap();
        let path = file.path().to_path_buf();
        let mut session = ScratchSession {
            path: Some(file.into_temp_path()),
            command: None,
            subject: "crash report".to_string(),
        };
        assert!(path.exists());

        session.delete_file().unwrap();
        assert!(!path.exists());

        // Second cleanup is a no-op
        session.delete_file().unwrap();
    }
}
