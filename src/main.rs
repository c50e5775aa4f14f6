//! # hubcrash CLI
//!
//! Host command-line interface. Its dispatch runs inside the failure boundary,
//! so any fatal error goes through the crash reporter.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use hubcrash::{
    config::{ConfigStore, FileConfig, GitConfig},
    constants::{GH_PROGRAM_ENV, LOG_ENV},
    editor::ScratchEditor,
    tracker::GhCliTracker,
    CrashReporter, PreferenceStore,
};

const GLOBAL_HELP: &str = "\
Crash Report Preference:
  HUB_REPORT_CRASH         Overrides the stored preference for one run (always, never)
  hub.reportCrash          Stored preference in global config (always, never)

Environment:
  HUBCRASH_GH              gh executable used to file issues (default: gh)
  HUBCRASH_LOG             Log filter (e.g. debug)

Prompt Answers:
  y, yes       Report this crash
  n, no        Do not report this crash
  a, always    Report this and all future crashes without asking
  e, never     Never report crashes and stop asking

Learn more:
  hubcrash <COMMAND> --help    Show detailed help for a command";

#[derive(Parser)]
#[command(name = "hubcrash")]
#[command(author = "Dominic Rodemer")]
#[command(version)]
#[command(about = "Crash reporting for command-line tools")]
#[command(
    long_about = "hubcrash catches fatal errors of a command-line tool, shows the error and its \
stack, and offers to file a crash report as a new issue on github/hub. The report opens in \
your editor first so you can review and redact it.\n\n\
Whether to report is asked once per crash unless you answer 'always' or 'never', which is \
remembered in your global configuration."
)]
#[command(after_help = GLOBAL_HELP)]
struct Cli {
    /// Where the crash report preference is stored
    #[arg(long, value_enum, default_value = "git", global = true)]
    config: Backend,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    /// Global git config (git config --global)
    Git,
    /// ~/.config/hubcrash/config
    File,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CrashKind {
    /// Return an error from the command
    Error,
    /// Panic with the message
    Panic,
    /// Panic with a payload that is neither an error nor a message
    Other,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective crash report preference
    #[command(
        long_about = "Show the effective crash report preference and where it comes from.\n\n\
The preference is resolved in this order:\n  \
1. HUB_REPORT_CRASH environment variable (if set and non-empty)\n  \
2. hub.reportCrash in the global configuration\n  \
3. unset (ask on every crash)"
    )]
    Preference,

    /// Fail on purpose to exercise the crash reporter
    #[command(after_help = "Examples:\n  \
hubcrash crash                               Return an error\n  \
hubcrash crash --kind panic -m \"boom\"        Panic with a message\n  \
HUB_REPORT_CRASH=never hubcrash crash        Print the error, never report")]
    Crash {
        /// Error message
        #[arg(short, long, default_value = "simulated crash")]
        message: String,

        /// How to fail
        #[arg(long, value_enum, default_value = "error")]
        kind: CrashKind,
    },
}

/// Errors returned by the host commands.
#[derive(Error, Debug)]
enum CliError {
    /// Requested by `hubcrash crash --kind error`
    #[error("{0}")]
    Simulated(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let backend = cli.config;
    let Err(failure) = hubcrash::guard_typed(|| run(cli)) else {
        return;
    };

    match config_store(backend) {
        Ok(config) => {
            let reporter = CrashReporter::from_env(
                config,
                Box::new(ScratchEditor::new()),
                Box::new(tracker()),
            );
            reporter.capture_crash(failure);
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn tracker() -> GhCliTracker {
    std::env::var(GH_PROGRAM_ENV)
        .ok()
        .filter(|program| !program.is_empty())
        .map_or_else(GhCliTracker::new, GhCliTracker::with_program)
}

fn config_store(backend: Backend) -> Result<Box<dyn ConfigStore>> {
    let store: Box<dyn ConfigStore> = match backend {
        Backend::Git => Box::new(GitConfig::new()),
        Backend::File => Box::new(FileConfig::global()?),
    };
    Ok(store)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Preference => {
            let store = PreferenceStore::from_env(config_store(cli.config)?);
            let resolved = store.resolve();
            println!("{} ({})", resolved.preference(), resolved.source);
            Ok(())
        }

        Commands::Crash { message, kind } => {
            tracing::debug!(?kind, "crashing on request");
            match kind {
                CrashKind::Error => Err(CliError::Simulated(message)),
                CrashKind::Panic => panic!("{message}"),
                CrashKind::Other => std::panic::panic_any(message.len()),
            }
        }
    }
}
