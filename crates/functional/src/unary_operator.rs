//! Fallible operators from `T` to `T`

use checked_core::carrier::{Cause, Expected};

use crate::function::{self, CheckedFunction};

/// A function from `T` to `T` that can fail with `E`
pub type CheckedUnaryOperator<T, E, F> = CheckedFunction<T, T, E, F>;

/// The operator that returns its input
pub fn identity<T, E>() -> CheckedUnaryOperator<T, E, fn(T) -> Result<T, E>> {
    function::identity()
}

/// Adapt a plain operator, recovering any carrier it raises whatever the cause
pub fn checked<T, G>(plain: G) -> CheckedUnaryOperator<T, Cause, impl Fn(T) -> Result<T, Cause>>
where
    G: Fn(T) -> T,
{
    function::checked(plain)
}

/// Adapt a plain operator, recovering carriers whose cause `expected` accepts
pub fn checked_as<T, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedUnaryOperator<T, E, impl Fn(T) -> Result<T, E>>
where
    G: Fn(T) -> T,
{
    function::checked_as(plain, expected)
}
