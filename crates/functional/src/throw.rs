//! Raising errors on the unchecked channel

use std::any::Any;
use std::panic;

/// Panic with `error` as the payload
///
/// Used by the `on_error_throw_as_unchecked` adapters. The payload is the
/// mapped error itself, so callers recover it with `downcast` after
/// `catch_unwind`. This is a genuine panic, not a carrier.
pub(crate) fn throw_unchecked<X>(error: X) -> !
where
    X: Any + Send + 'static,
{
    panic::panic_any(error)
}
