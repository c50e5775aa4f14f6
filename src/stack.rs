//! # Stack Capture
//!
//! Snapshots the current thread's call stack and renders it without the
//! frames of the capture machinery itself.
//!
//! ## Rendering
//! 1. Strip NUL padding from both ends of the buffer
//! 2. Keep the header line
//! 3. Drop leading frames of the capture machinery and the crash handler
//! 4. Keep every remaining line in its original order
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::backtrace::Backtrace;

use crate::constants::STACK_BUFFER_SIZE;

/// Symbols of frames that belong to crash handling, not to the crashed code.
const MACHINERY_SYMBOLS: &[&str] = &[
    "std::backtrace_rs::",
    "std::backtrace::",
    "backtrace::",
    "hubcrash::stack::capture",
    "hubcrash::boundary::",
    "hubcrash::reporter::",
    "as core::ops::function::Fn",
    "std::panicking::",
    "core::panicking::",
    "__rust_end_short_backtrace",
    "rust_begin_unwind",
];

/// Captures the current stack and renders it.
pub fn capture() -> String {
    format_stack(&capture_raw())
}

/// Captures the current stack into a fixed-size, NUL-padded buffer.
///
/// Captures larger than [`STACK_BUFFER_SIZE`] are truncated.
pub fn capture_raw() -> Vec<u8> {
    let snapshot = format!("{}\n{}", header(), Backtrace::force_capture());

    let mut buf = vec![0; STACK_BUFFER_SIZE];
    let len = snapshot.len().min(buf.len());
    buf[..len].copy_from_slice(&snapshot.as_bytes()[..len]);
    buf
}

/// Renders a raw capture: header line first, machinery frames removed.
pub fn format_stack(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(trim_nul(raw));
    let mut lines = text.lines();

    let Some(header) = lines.next() else {
        return String::new();
    };

    let mut rendered = vec![header];
    let mut skipping = true;

    for line in lines {
        if skipping {
            match frame_symbol(line) {
                Some(symbol) if is_machinery(symbol) => continue,
                Some(_) => skipping = false,
                // Location line of a dropped frame
                None => continue,
            }
        }
        rendered.push(line);
    }

    rendered.join("\n")
}

fn header() -> String {
    let thread = std::thread::current();
    format!("thread '{}' stack:", thread.name().unwrap_or("<unnamed>"))
}

fn trim_nul(raw: &[u8]) -> &[u8] {
    let start = raw.iter().position(|&b| b != 0).unwrap_or(raw.len());
    let end = raw.iter().rposition(|&b| b != 0).map_or(start, |i| i + 1);
    &raw[start..end]
}

/// Returns the symbol of a frame line (`  12: some::symbol`), or `None` for
/// any other line.
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(": ")?;
    (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then_some(symbol)
}

fn is_machinery(symbol: &str) -> bool {
    MACHINERY_SYMBOLS.iter().any(|m| symbol.contains(m))
}
