//! Common test utilities and fixtures
//!
//! Error types standing in for the failures checked operations report, an
//! invocation counter for the closures under test, and helpers that catch
//! unwinds and classify their payloads.

#![allow(dead_code)]

use std::any::Any;
use std::cell::Cell;
use std::io;
use std::panic::{self, AssertUnwindSafe};

use checked_functional::carrier::UncheckedError;

/// Failure while parsing `input`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unparseable '{input}' at offset {offset}")]
pub struct ParseError {
    pub input: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(input: impl Into<String>, offset: usize) -> Self {
        Self {
            input: input.into(),
            offset,
        }
    }
}

/// Failure of a larger execution, caused by an I/O error
#[derive(Debug, thiserror::Error)]
#[error("execution failed")]
pub struct ExecutionError {
    #[source]
    source: io::Error,
}

impl ExecutionError {
    pub fn new(source: io::Error) -> Self {
        Self { source }
    }
}

/// Payload of the genuine panics raised by the closures under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrecoverable(pub String);

pub fn io_error(message: impl Into<String>) -> io::Error {
    io::Error::other(message.into())
}

/// Panic with an [`Unrecoverable`] payload
pub fn fail_unchecked(message: &str) -> ! {
    panic::panic_any(Unrecoverable(message.to_string()))
}

/// Counts how often a closure ran
#[derive(Debug, Default)]
pub struct Calls(Cell<usize>);

impl Calls {
    pub fn hit(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }
}

/// Run `f`, which must panic, and return the payload
pub fn panic_payload<R>(f: impl FnOnce() -> R) -> Box<dyn Any + Send> {
    checked_core::logging::init_for_tests();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("expected the invocation to unwind"),
        Err(payload) => payload,
    }
}

/// Run `f`, which must raise a carrier, and return it
pub fn carrier_of<R>(f: impl FnOnce() -> R) -> UncheckedError {
    UncheckedError::from_panic(panic_payload(f))
        .unwrap_or_else(|_| panic!("expected a carrier payload"))
}

/// Run `f`, which must panic with a payload of type `X`, and return it
pub fn unchecked_payload<X: Any, R>(f: impl FnOnce() -> R) -> X {
    match panic_payload(f).downcast::<X>() {
        Ok(payload) => *payload,
        Err(_) => panic!("unexpected panic payload type"),
    }
}
