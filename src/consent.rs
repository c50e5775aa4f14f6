//! # Consent
//!
//! Decides, once per crash, whether the report is sent.
//!
//! ```text
//! Deciding ──always──▶ AutoReport ───┐
//!     │ ────never───▶ AutoSuppress ──┼──▶ Done
//!     └──otherwise──▶ Prompting ─────┘
//! ```
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::io;

use crate::{
    console::Console,
    constants::CONSENT_PROMPT,
    event::CrashEvent,
    preference::{PreferenceStore, ReportPreference},
};

/// An answer to the consent prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Always,
    Never,
}

/// Accepted tokens, compared case-insensitively.
const ANSWERS: &[(&str, Answer)] = &[
    ("y", Answer::Yes),
    ("yes", Answer::Yes),
    ("n", Answer::No),
    ("no", Answer::No),
    ("a", Answer::Always),
    ("always", Answer::Always),
    ("e", Answer::Never),
    ("never", Answer::Never),
];

impl Answer {
    /// Looks up a token. Unrecognized input declines.
    pub fn parse(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        ANSWERS
            .iter()
            .find(|(accepted, _)| *accepted == token)
            .map_or(Self::No, |&(_, answer)| answer)
    }

    /// The decision this answer stands for.
    pub const fn consent(self) -> Consent {
        match self {
            Self::Yes => Consent::report(),
            Self::No => Consent::suppress(),
            Self::Always => Consent {
                report: true,
                remember: Some(ReportPreference::Always),
            },
            Self::Never => Consent {
                report: false,
                remember: Some(ReportPreference::Never),
            },
        }
    }
}

/// States of one consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Deciding,
    AutoReport,
    AutoSuppress,
    Prompting,
    Done,
}

/// The outcome of a consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consent {
    /// Send the report
    pub report: bool,
    /// Preference to persist once the flow completes
    pub remember: Option<ReportPreference>,
}

impl Consent {
    pub const fn report() -> Self {
        Self {
            report: true,
            remember: None,
        }
    }

    pub const fn suppress() -> Self {
        Self {
            report: false,
            remember: None,
        }
    }
}

/// Runs the consent state machine for one crash.
pub struct ConsentController<'a> {
    preferences: &'a PreferenceStore,
    console: &'a mut Console,
    state: ConsentState,
}

impl<'a> ConsentController<'a> {
    pub fn new(preferences: &'a PreferenceStore, console: &'a mut Console) -> Self {
        Self {
            preferences,
            console,
            state: ConsentState::Deciding,
        }
    }

    pub const fn state(&self) -> ConsentState {
        self.state
    }

    /// Reads the preference once and decides, prompting if needed.
    ///
    /// The error text and stack are printed before any prompt, and whenever
    /// the report is suppressed by preference.
    pub fn decide(&mut self, event: &CrashEvent) -> io::Result<Consent> {
        let consent = match self.preferences.get() {
            ReportPreference::Always => {
                self.enter(ConsentState::AutoReport);
                Consent::report()
            }
            ReportPreference::Never => {
                self.enter(ConsentState::AutoSuppress);
                self.console.print_error(event.error(), event.stack())?;
                Consent::suppress()
            }
            ReportPreference::Unset => {
                self.enter(ConsentState::Prompting);
                self.console.print_error(event.error(), event.stack())?;
                let token = self.console.ask(CONSENT_PROMPT)?;
                Answer::parse(&token).consent()
            }
        };

        self.enter(ConsentState::Done);
        Ok(consent)
    }

    fn enter(&mut self, state: ConsentState) {
        tracing::debug!(from = ?self.state, to = ?state, "crash report consent");
        self.state = state;
    }
}
