//! Fallible two-argument predicates

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// A test on `(&T, &U)` that can fail with `E`
///
/// `and` and `or` short-circuit: the receiver is always evaluated first, and
/// the other predicate only runs when the receiver's answer does not already
/// decide the result.
pub struct CheckedBiPredicate<T: ?Sized, U: ?Sized, E, F> {
    f: F,
    _marker: PhantomData<fn(&T, &U) -> Result<bool, E>>,
}

impl<T: ?Sized, U: ?Sized, E, F> CheckedBiPredicate<T, U, E, F>
where
    F: Fn(&T, &U) -> Result<bool, E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn test(&self, t: &T, u: &U) -> Result<bool, E> {
        (self.f)(t, u)
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    pub fn and<G>(self, other: G) -> CheckedBiPredicate<T, U, E, impl Fn(&T, &U) -> Result<bool, E>>
    where
        G: Fn(&T, &U) -> Result<bool, E>,
    {
        CheckedBiPredicate::of(move |t: &T, u: &U| match (self.f)(t, u) {
            Ok(true) => other(t, u),
            decided => decided,
        })
    }

    pub fn or<G>(self, other: G) -> CheckedBiPredicate<T, U, E, impl Fn(&T, &U) -> Result<bool, E>>
    where
        G: Fn(&T, &U) -> Result<bool, E>,
    {
        CheckedBiPredicate::of(move |t: &T, u: &U| match (self.f)(t, u) {
            Ok(false) => other(t, u),
            decided => decided,
        })
    }

    pub fn negate(self) -> CheckedBiPredicate<T, U, E, impl Fn(&T, &U) -> Result<bool, E>> {
        CheckedBiPredicate::of(move |t: &T, u: &U| (self.f)(t, u).map(|b| !b))
    }

    pub fn unchecked(self) -> impl Fn(&T, &U) -> bool
    where
        E: Into<Cause>,
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(|e| carrier::raise(e))
    }

    pub fn on_error_return(self, value: bool) -> impl Fn(&T, &U) -> bool {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or(value)
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedBiPredicate<T, U, E2, impl Fn(&T, &U) -> Result<bool, E2>>
    where
        H: Fn(E) -> Result<bool, E2>,
    {
        CheckedBiPredicate::of(move |t: &T, u: &U| (self.f)(t, u).or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn(&T, &U) -> bool
    where
        H: Fn(E) -> bool,
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedBiPredicate<T, U, E2, impl Fn(&T, &U) -> Result<bool, E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedBiPredicate::of(move |t: &T, u: &U| (self.f)(t, u).map_err(&mapper))
    }

    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn(&T, &U) -> bool
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    /// Ask `fallback` about the same input when this predicate fails
    pub fn on_error_test_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedBiPredicate<T, U, E2, impl Fn(&T, &U) -> Result<bool, E2>>
    where
        G: Fn(&T, &U) -> Result<bool, E2>,
    {
        CheckedBiPredicate::of(move |t: &T, u: &U| (self.f)(t, u).or_else(|_| fallback(t, u)))
    }

    pub fn on_error_test_unchecked<G>(self, fallback: G) -> impl Fn(&T, &U) -> bool
    where
        G: Fn(&T, &U) -> bool,
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(|_| fallback(t, u))
    }
}

impl<T: ?Sized, U: ?Sized, E, F: Clone> Clone for CheckedBiPredicate<T, U, E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, U: ?Sized, E, F> fmt::Debug for CheckedBiPredicate<T, U, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedBiPredicate").finish_non_exhaustive()
    }
}

/// The negation of `target`
pub fn not<T: ?Sized, U: ?Sized, E, G>(
    target: G,
) -> CheckedBiPredicate<T, U, E, impl Fn(&T, &U) -> Result<bool, E>>
where
    G: Fn(&T, &U) -> Result<bool, E>,
{
    CheckedBiPredicate::of(target).negate()
}

/// Adapt a plain predicate, recovering any carrier it raises whatever the cause
pub fn checked<T: ?Sized, U: ?Sized, G>(
    plain: G,
) -> CheckedBiPredicate<T, U, Cause, impl Fn(&T, &U) -> Result<bool, Cause>>
where
    G: Fn(&T, &U) -> bool,
{
    CheckedBiPredicate::of(move |t: &T, u: &U| carrier::catch_any(|| plain(t, u)))
}

/// Adapt a plain predicate, recovering carriers whose cause `expected` accepts
pub fn checked_as<T: ?Sized, U: ?Sized, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedBiPredicate<T, U, E, impl Fn(&T, &U) -> Result<bool, E>>
where
    G: Fn(&T, &U) -> bool,
{
    CheckedBiPredicate::of(move |t: &T, u: &U| {
        carrier::invoke_and_unwrap(|| plain(t, u), &expected)
    })
}
