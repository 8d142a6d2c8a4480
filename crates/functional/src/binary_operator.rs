//! Fallible operators from `(T, T)` to `T`

use std::cmp::Ordering;

use checked_core::carrier::{Cause, Expected};

use crate::bi_function::{self, CheckedBiFunction};

/// A function from `(T, T)` to `T` that can fail with `E`
pub type CheckedBinaryOperator<T, E, F> = CheckedBiFunction<T, T, T, E, F>;

/// The lesser of two values according to `comparator`; the first on a tie
pub fn min_by<T, E, C>(comparator: C) -> CheckedBinaryOperator<T, E, impl Fn(T, T) -> Result<T, E>>
where
    C: Fn(&T, &T) -> Result<Ordering, E>,
{
    CheckedBiFunction::of(move |a: T, b: T| {
        comparator(&a, &b).map(|ordering| if ordering.is_le() { a } else { b })
    })
}

/// The greater of two values according to `comparator`; the first on a tie
pub fn max_by<T, E, C>(comparator: C) -> CheckedBinaryOperator<T, E, impl Fn(T, T) -> Result<T, E>>
where
    C: Fn(&T, &T) -> Result<Ordering, E>,
{
    CheckedBiFunction::of(move |a: T, b: T| {
        comparator(&a, &b).map(|ordering| if ordering.is_ge() { a } else { b })
    })
}

/// Adapt a plain operator, recovering any carrier it raises whatever the cause
pub fn checked<T, G>(
    plain: G,
) -> CheckedBinaryOperator<T, Cause, impl Fn(T, T) -> Result<T, Cause>>
where
    G: Fn(T, T) -> T,
{
    bi_function::checked(plain)
}

/// Adapt a plain operator, recovering carriers whose cause `expected` accepts
pub fn checked_as<T, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedBinaryOperator<T, E, impl Fn(T, T) -> Result<T, E>>
where
    G: Fn(T, T) -> T,
{
    bi_function::checked_as(plain, expected)
}
