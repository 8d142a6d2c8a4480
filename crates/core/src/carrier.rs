//! Carrying typed errors across infallible boundaries
//!
//! A checked operation reports failure through `Err(E)`. Some call sites only
//! accept infallible closures: iterator adapters, callback registries, sort
//! comparators. To get an `E` through one of those, the error is wrapped in an
//! [`UncheckedError`] and raised as an unwinding panic payload. On the far side,
//! [`invoke_and_unwrap`] catches the unwind, checks the carrier's cause against
//! an [`Expected`] error type and hands the original error back as `Err(E)`.
//!
//! Carriers whose cause does not match are raised again unchanged, so an outer
//! caller expecting a different type can still recover them. Panics that are
//! not carriers are never touched.
//!
//! ```
//! use checked_core::carrier::{self, Expected};
//! use std::num::ParseIntError;
//!
//! let parse = |s: &str| s.parse::<i32>().unwrap_or_else(|e| carrier::raise(e));
//!
//! let parsed = carrier::invoke_and_unwrap(
//!     || ["1", "2", "x"].into_iter().map(parse).collect::<Vec<_>>(),
//!     &Expected::<ParseIntError>::of(),
//! );
//! assert!(parsed.is_err());
//! ```
//!
//! The protocol relies on unwinding and does nothing useful under
//! `panic = "abort"`.
//!
//! Wrapping and raising consult the process-wide [`config`] through a shared
//! read lock. [`raise`] takes a single snapshot for both steps; the lock is
//! uncontended unless [`config::set_global`] runs at the same time, and
//! [`invoke_and_unwrap`] never takes it.

use std::any::{type_name, Any};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::trace;

use crate::config::{self, RaiseMode};
use crate::constants::CARRIER_TRACE_TARGET;

/// The boxed form every carried error takes
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Payload type of a caught panic
pub type Payload = Box<dyn Any + Send + 'static>;

/// An unchecked wrapper around exactly one typed error
///
/// The cause is the real failure; the carrier only exists while the error
/// crosses a boundary that cannot name its type.
#[derive(Debug)]
pub struct UncheckedError {
    message: Option<String>,
    cause: Cause,
    backtrace: Backtrace,
}

impl UncheckedError {
    /// Wrap `cause` in a new carrier
    pub fn new(cause: impl Into<Cause>) -> Self {
        Self::build(None, cause.into(), config::global().capture_backtrace)
    }

    /// Wrap `cause` in a new carrier with a message of its own
    pub fn with_message(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self::build(
            Some(message.into()),
            cause.into(),
            config::global().capture_backtrace,
        )
    }

    fn build(message: Option<String>, cause: Cause, capture_backtrace: bool) -> Self {
        trace!(target: CARRIER_TRACE_TARGET, cause = %cause, "wrapping error in carrier");
        let backtrace = if capture_backtrace {
            Backtrace::force_capture()
        } else {
            Backtrace::disabled()
        };
        Self {
            message,
            cause,
            backtrace,
        }
    }

    /// Recover a carrier from a caught panic payload
    ///
    /// Hands the payload back untouched when it is not a carrier.
    pub fn from_panic(payload: Payload) -> Result<Self, Payload> {
        payload.downcast::<Self>().map(|carrier| *carrier)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.cause
    }

    pub fn into_cause(self) -> Cause {
        self.cause
    }

    /// Backtrace of the wrap site, when capture is enabled in the configuration
    pub fn backtrace(&self) -> Option<&Backtrace> {
        match self.backtrace.status() {
            BacktraceStatus::Captured => Some(&self.backtrace),
            _ => None,
        }
    }

    /// Whether the cause is exactly an `E`
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.cause.is::<E>()
    }

    /// Take the cause out as an `E`, or get the carrier back unchanged
    pub fn downcast<E>(self) -> Result<E, Self>
    where
        E: StdError + 'static,
    {
        match self.cause.downcast::<E>() {
            Ok(cause) => Ok(*cause),
            Err(cause) => Err(Self { cause, ..self }),
        }
    }

    /// Take the cause out if `expected` accepts it, or get the carrier back unchanged
    pub fn unwrap_as<E>(self, expected: &Expected<E>) -> Result<E, Self> {
        let Self {
            message,
            cause,
            backtrace,
        } = self;
        expected.take(cause).map_err(|cause| Self {
            message,
            cause,
            backtrace,
        })
    }

    /// Unwind with this carrier as the payload
    pub fn raise(self) -> ! {
        self.raise_as(config::global().raise)
    }

    fn raise_as(self, mode: RaiseMode) -> ! {
        match mode {
            RaiseMode::Resume => panic::resume_unwind(Box::new(self)),
            RaiseMode::Panic => panic::panic_any(self),
        }
    }

    // Re-raising a carrier that was already in flight never reports it twice.
    fn resume(self) -> ! {
        panic::resume_unwind(Box::new(self))
    }
}

impl fmt::Display for UncheckedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "{}", self.cause),
        }
    }
}

impl StdError for UncheckedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.cause)
    }
}

type Matcher<E> = fn(Cause) -> Result<E, Cause>;

/// The error type a caller is prepared to receive back from a carrier
///
/// Rust has no subtyping between error types, so the "subtypes" of `E` are
/// listed explicitly: each one must convert into `E` through `From`. Matchers
/// are tried in registration order.
pub struct Expected<E> {
    names: Vec<&'static str>,
    matchers: Vec<Matcher<E>>,
}

impl<E> Expected<E>
where
    E: StdError + Send + Sync + 'static,
{
    /// Accept causes of exactly type `E`
    pub fn of() -> Self {
        let matcher: Matcher<E> = exact::<E>;
        Self {
            names: vec![type_name::<E>()],
            matchers: vec![matcher],
        }
    }
}

impl Expected<Cause> {
    /// Accept every cause as-is
    pub fn any() -> Self {
        let matcher: Matcher<Cause> = Ok;
        Self {
            names: vec!["any error"],
            matchers: vec![matcher],
        }
    }
}

impl<E> Expected<E> {
    /// Also accept causes of type `S`, converted into `E`
    #[must_use]
    pub fn or_subtype<S>(mut self) -> Self
    where
        S: StdError + Send + Sync + 'static,
        E: From<S>,
    {
        self.names.push(type_name::<S>());
        self.matchers.push(subtype::<S, E>);
        self
    }

    /// Readable list of the accepted types
    pub fn name(&self) -> String {
        self.names.join(" | ")
    }

    /// Convert `cause` with the first matcher that accepts it
    pub fn take(&self, cause: Cause) -> Result<E, Cause> {
        let mut cause = cause;
        for matcher in &self.matchers {
            match matcher(cause) {
                Ok(error) => return Ok(error),
                Err(rejected) => cause = rejected,
            }
        }
        Err(cause)
    }
}

impl<E> Clone for Expected<E> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            matchers: self.matchers.clone(),
        }
    }
}

impl<E> fmt::Debug for Expected<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected({})", self.name())
    }
}

fn exact<E>(cause: Cause) -> Result<E, Cause>
where
    E: StdError + Send + Sync + 'static,
{
    cause.downcast::<E>().map(|error| *error)
}

fn subtype<S, E>(cause: Cause) -> Result<E, Cause>
where
    S: StdError + Send + Sync + 'static,
    E: From<S>,
{
    cause.downcast::<S>().map(|error| E::from(*error))
}

/// Wrap `error` in a carrier
pub fn wrap(error: impl Into<Cause>) -> UncheckedError {
    UncheckedError::new(error)
}

/// Wrap `error` in a carrier with its own message
pub fn wrap_with_message(message: impl Into<String>, error: impl Into<Cause>) -> UncheckedError {
    UncheckedError::with_message(message, error)
}

/// Wrap `error` in a carrier and raise it
pub fn raise(error: impl Into<Cause>) -> ! {
    let config = config::global();
    UncheckedError::build(None, error.into(), config.capture_backtrace).raise_as(config.raise)
}

/// Run `invocation`, recovering any carrier whose cause `expected` accepts
///
/// - normal completion returns `Ok` with the value;
/// - a carrier with an accepted cause returns `Err` with that cause;
/// - a carrier with any other cause is raised again unchanged;
/// - any other panic resumes unmodified.
pub fn invoke_and_unwrap<R, E, F>(invocation: F, expected: &Expected<E>) -> Result<R, E>
where
    F: FnOnce() -> R,
{
    let payload = match panic::catch_unwind(AssertUnwindSafe(invocation)) {
        Ok(value) => return Ok(value),
        Err(payload) => payload,
    };
    let carrier = match UncheckedError::from_panic(payload) {
        Ok(carrier) => carrier,
        Err(payload) => panic::resume_unwind(payload),
    };
    match carrier.unwrap_as(expected) {
        Ok(error) => {
            trace!(target: CARRIER_TRACE_TARGET, expected = %expected.name(), "unwrapped carrier");
            Err(error)
        }
        Err(carrier) => {
            trace!(
                target: CARRIER_TRACE_TARGET,
                expected = %expected.name(),
                cause = %carrier.cause(),
                "re-raising carrier with unexpected cause"
            );
            carrier.resume()
        }
    }
}

/// Run `invocation`, recovering any carrier whatever its cause
pub fn catch_any<R, F>(invocation: F) -> Result<R, Cause>
where
    F: FnOnce() -> R,
{
    invoke_and_unwrap(invocation, &Expected::any())
}
