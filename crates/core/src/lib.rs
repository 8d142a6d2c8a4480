//! Core building blocks for checked operations.
//!
//! This crate holds everything the functional shapes in `checked-functional`
//! lean on, so they can stay thin.
//!
//! ## Key Components
//!
//! - **`carrier`**: the wrap/unwrap protocol that moves a typed error through a
//!   closure that is not allowed to return one, then recovers it against an
//!   expected error type.
//! - **`config`**: process-wide settings for how carriers are raised, read from
//!   the environment or JSON.
//! - **`errors`**: the library-level `Error` enum and `Result` alias.
//! - **`logging`** (feature `logging`): subscriber setup for the `tracing`
//!   events emitted here.
//! - **`constants`**: environment variable names and tracing targets.

pub mod carrier;
pub mod config;
pub mod constants;
pub mod errors;
#[cfg(feature = "logging")]
pub mod logging;

pub use self::{
    carrier::{
        catch_any, invoke_and_unwrap, raise, wrap, wrap_with_message, Cause, Expected,
        UncheckedError,
    },
    config::{CarrierConfig, RaiseMode},
    errors::{Error, Result, ResultExt},
};
