//! Checked functional shapes: functions, operators, suppliers, runnables,
//! consumers and predicates that can fail with a declared error type.
//!
//! Every shape wraps a closure returning `Result<_, E>` and exposes the same
//! family of adapters:
//!
//! - `unchecked()` turns the shape into a plain closure that raises `Err(e)`
//!   as a [`carrier::UncheckedError`] around `e`;
//! - `on_error_*` adapters substitute a value, call a handler, map the error,
//!   or delegate to a fallback with the same input;
//! - `and`/`or`/`negate` on predicates and `and_then` on functions, runnables
//!   and consumers compose shapes.
//!
//! Only `Err(E)` is ever intercepted. A panic inside a shape, including a
//! carrier raised by some inner `unchecked()` view, passes through every
//! adapter. Each shape module also provides `checked` and `checked_as` to
//! turn a plain closure back into a checked shape by recovering carriers.
//!
//! ```
//! use checked_functional::prelude::*;
//! use std::num::ParseIntError;
//!
//! let parse = CheckedFunction::of(|s: &str| s.parse::<i32>());
//!
//! // The plain view fits `Iterator::map`; the first failure comes back typed.
//! let numbers = invoke_and_unwrap(
//!     || ["4", "x", "6"].into_iter().map(parse.unchecked()).collect::<Vec<_>>(),
//!     &Expected::<ParseIntError>::of(),
//! );
//! assert!(numbers.is_err());
//! ```

pub mod bi_consumer;
pub mod bi_function;
pub mod bi_predicate;
pub mod binary_operator;
pub mod consumer;
pub mod function;
pub mod predicate;
pub mod runnable;
pub mod supplier;
pub mod unary_operator;

mod throw;

// Re-export the carrier surface so users need a single dependency
pub use checked_core::{carrier, config, CarrierConfig, RaiseMode};

pub use bi_consumer::CheckedBiConsumer;
pub use bi_function::CheckedBiFunction;
pub use bi_predicate::CheckedBiPredicate;
pub use binary_operator::CheckedBinaryOperator;
pub use consumer::CheckedConsumer;
pub use function::CheckedFunction;
pub use predicate::CheckedPredicate;
pub use runnable::CheckedRunnable;
pub use supplier::CheckedSupplier;
pub use unary_operator::CheckedUnaryOperator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::{
        CheckedBiConsumer, CheckedBiFunction, CheckedBiPredicate, CheckedBinaryOperator,
        CheckedConsumer, CheckedFunction, CheckedPredicate, CheckedRunnable, CheckedSupplier,
        CheckedUnaryOperator,
    };
    pub use checked_core::carrier::{
        catch_any, invoke_and_unwrap, Cause, Expected, UncheckedError,
    };
}
