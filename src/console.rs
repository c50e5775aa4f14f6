//! # Console
//!
//! Line-oriented terminal I/O used on the crash path: the error printout, the
//! consent prompt, the issue URL and failure messages.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;

/// Injected standard input, output and error streams.
pub struct Console {
    input: Box<dyn BufRead>,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Console {
    pub fn new(input: Box<dyn BufRead>, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self { input, out, err }
    }

    /// Console bound to the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    /// Prints the error text followed by the stack.
    pub fn print_error(&mut self, error: &anyhow::Error, stack: &str) -> io::Result<()> {
        writeln!(self.out, "{error}\n")?;
        writeln!(self.out, "{stack}")?;
        self.out.flush()
    }

    /// Prints `question` without a newline and reads a single token.
    ///
    /// End of input yields an empty string.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.out, "{question}")?;
        self.out.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;

        Ok(line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    /// Prints one line to standard output.
    pub fn println(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    /// Prints an error message with a red prefix to standard error.
    ///
    /// Failures to write are ignored; there is nowhere left to report them.
    pub fn print_failure(&mut self, message: &str) {
        let _ = writeln!(self.err, "{} {message}", "error:".red().bold());
        let _ = self.err.flush();
    }
}
