//! # Failure Boundary
//!
//! The top-level catch-all around a host CLI's dispatch. Both returned errors
//! and panics come out of [`guard`] as a [`Failure`], which the crash reporter
//! then handles.
//!
//! ## Narrowing
//! Only errors and string messages are actionable. Any other panic payload
//! (e.g. `std::panic::panic_any(42)`) becomes [`Failure::Other`] and is
//! ignored by the reporter: no stack, no prompt, no exit.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    any::{type_name, Any},
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

use crate::{error::PanicMessage, stack};

thread_local! {
    /// Whether the current thread is running inside [`guard`].
    static GUARDED: Cell<bool> = const { Cell::new(false) };

    /// Stack captured by the panic hook at the point of failure.
    static PANIC_STACK: RefCell<Option<String>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

/// A failure value recovered at the boundary.
#[derive(Debug)]
pub enum Failure {
    /// An error value, with the name of its concrete type
    Error {
        error: anyhow::Error,
        type_name: &'static str,
        stack: Option<String>,
    },

    /// A string-valued failure (a `panic!` message)
    Message {
        message: String,
        stack: Option<String>,
    },

    /// Anything else. Deliberately not reported.
    Other,
}

/// A failure normalized to an error, ready to be reported.
#[derive(Debug)]
pub struct CaughtError {
    pub error: anyhow::Error,
    pub type_name: &'static str,
    /// Stack captured where the failure happened, if known
    pub stack: Option<String>,
}

impl Failure {
    /// Wraps a typed error, remembering its type name.
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Error {
            error: anyhow::Error::new(error),
            type_name: type_name::<E>(),
            stack: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
            stack: None,
        }
    }

    /// Classifies a panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>, stack: Option<String>) -> Self {
        let payload = match payload.downcast::<anyhow::Error>() {
            Ok(error) => {
                return Self::Error {
                    error: *error,
                    type_name: type_name::<anyhow::Error>(),
                    stack,
                }
            }
            Err(payload) => payload,
        };

        let payload = match payload.downcast::<String>() {
            Ok(message) => return Self::Message { message: *message, stack },
            Err(payload) => payload,
        };

        match payload.downcast::<&'static str>() {
            Ok(message) => Self::Message {
                message: (*message).to_string(),
                stack,
            },
            Err(_) => Self::Other,
        }
    }

    /// Converts the failure into a reportable error.
    ///
    /// Returns `None` for [`Failure::Other`].
    pub fn normalize(self) -> Option<CaughtError> {
        match self {
            Self::Error {
                error,
                type_name,
                stack,
            } => Some(CaughtError {
                error,
                type_name,
                stack,
            }),
            Self::Message { message, stack } => Some(CaughtError {
                error: anyhow::Error::new(PanicMessage(message)),
                type_name: type_name::<PanicMessage>(),
                stack,
            }),
            Self::Other => None,
        }
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        Self::Error {
            error,
            type_name: type_name::<anyhow::Error>(),
            stack: None,
        }
    }
}

/// Runs `f`, converting a returned error or a panic into a [`Failure`].
///
/// Panics inside `f` do not print the default panic message; their stack is
/// captured at the panic site instead.
///
/// A returned `anyhow::Error` is reported with the type name `anyhow::Error`,
/// since the concrete type behind it is erased. Use [`guard_typed`] to keep it.
pub fn guard<T, F>(f: F) -> Result<T, Failure>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    catch(|| f().map_err(Failure::from))
}

/// Like [`guard`], for a host returning its own error type `E`. The report
/// names `E` as the error type.
pub fn guard_typed<T, E, F>(f: F) -> Result<T, Failure>
where
    F: FnOnce() -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    catch(|| f().map_err(Failure::error))
}

fn catch<T, F>(f: F) -> Result<T, Failure>
where
    F: FnOnce() -> Result<T, Failure>,
{
    install_hook();

    let was_guarded = GUARDED.with(|g| g.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    GUARDED.with(|g| g.set(was_guarded));

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(Failure::from_panic(payload, take_panic_stack())),
    }
}

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARDED.with(Cell::get) {
                let captured = stack::capture();
                PANIC_STACK.with(|cell| *cell.borrow_mut() = Some(captured));
            } else {
                previous(info);
            }
        }));
    });
}

fn take_panic_stack() -> Option<String> {
    PANIC_STACK.with(|cell| cell.borrow_mut().take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_passes_value_through() {
        let value = guard(|| Ok(7)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_guard_returned_error() {
        let failure = guard::<(), _>(|| anyhow::bail!("config missing")).unwrap_err();
        let caught = failure.normalize().unwrap();
        assert_eq!(caught.error.to_string(), "config missing");
        assert_eq!(caught.type_name, "anyhow::Error");
        assert!(caught.stack.is_none());
    }

    #[test]
    fn test_guard_string_panic() {
        let failure = guard::<(), _>(|| panic!("index {} out of range", 3)).unwrap_err();
        match failure {
            Failure::Message { message, stack } => {
                assert_eq!(message, "index 3 out of range");
                assert!(stack.is_some_and(|s| s.starts_with("thread '")));
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn test_guard_static_str_panic() {
        let failure = guard::<(), _>(|| panic!("boom")).unwrap_err();
        let caught = failure.normalize().unwrap();
        assert_eq!(caught.error.to_string(), "boom");
        assert!(caught.type_name.ends_with("PanicMessage"));
    }

    #[test]
    fn test_guard_other_payload_is_narrowed() {
        let failure = guard::<(), _>(|| std::panic::panic_any(42_i32)).unwrap_err();
        assert!(matches!(failure, Failure::Other));
        assert!(failure.normalize().is_none());
    }

    #[test]
    fn test_guard_anyhow_payload() {
        let failure =
            guard::<(), _>(|| std::panic::panic_any(anyhow::anyhow!("fatal"))).unwrap_err();
        assert!(matches!(failure, Failure::Error { .. }));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("remote not found: {0}")]
    struct RemoteNotFound(String);

    #[test]
    fn test_guard_typed_records_error_type() {
        let failure =
            guard_typed::<(), _, _>(|| Err(RemoteNotFound("origin".into()))).unwrap_err();
        let caught = failure.normalize().unwrap();
        assert_eq!(caught.error.to_string(), "remote not found: origin");
        assert!(caught.type_name.ends_with("RemoteNotFound"));
    }

    #[test]
    fn test_guard_typed_catches_panics() {
        let failure = guard_typed::<(), RemoteNotFound, _>(|| panic!("boom")).unwrap_err();
        assert!(matches!(failure, Failure::Message { .. }));
    }

    #[test]
    fn test_typed_error_keeps_type_name() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let caught = Failure::error(io).normalize().unwrap();
        assert!(caught.type_name.starts_with("std::io::"));
    }

    #[test]
    fn test_guard_restores_unguarded_state() {
        let _ = guard::<(), _>(|| panic!("first"));
        assert!(!GUARDED.with(Cell::get));
        assert!(take_panic_stack().is_none());
    }
}
