//! Fallible predicates

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// A test on `&T` that can fail with `E`
///
/// `and` and `or` short-circuit: the receiver is always evaluated first, and
/// the other predicate only runs when the receiver's answer does not already
/// decide the result.
pub struct CheckedPredicate<T: ?Sized, E, F> {
    f: F,
    _marker: PhantomData<fn(&T) -> Result<bool, E>>,
}

impl<T: ?Sized, E, F> CheckedPredicate<T, E, F>
where
    F: Fn(&T) -> Result<bool, E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn test(&self, t: &T) -> Result<bool, E> {
        (self.f)(t)
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    pub fn and<G>(self, other: G) -> CheckedPredicate<T, E, impl Fn(&T) -> Result<bool, E>>
    where
        G: Fn(&T) -> Result<bool, E>,
    {
        CheckedPredicate::of(move |t: &T| match (self.f)(t) {
            Ok(true) => other(t),
            decided => decided,
        })
    }

    pub fn or<G>(self, other: G) -> CheckedPredicate<T, E, impl Fn(&T) -> Result<bool, E>>
    where
        G: Fn(&T) -> Result<bool, E>,
    {
        CheckedPredicate::of(move |t: &T| match (self.f)(t) {
            Ok(false) => other(t),
            decided => decided,
        })
    }

    pub fn negate(self) -> CheckedPredicate<T, E, impl Fn(&T) -> Result<bool, E>> {
        CheckedPredicate::of(move |t: &T| (self.f)(t).map(|b| !b))
    }

    pub fn unchecked(self) -> impl Fn(&T) -> bool
    where
        E: Into<Cause>,
    {
        move |t: &T| (self.f)(t).unwrap_or_else(|e| carrier::raise(e))
    }

    pub fn on_error_return(self, value: bool) -> impl Fn(&T) -> bool {
        move |t: &T| (self.f)(t).unwrap_or(value)
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedPredicate<T, E2, impl Fn(&T) -> Result<bool, E2>>
    where
        H: Fn(E) -> Result<bool, E2>,
    {
        CheckedPredicate::of(move |t: &T| (self.f)(t).or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn(&T) -> bool
    where
        H: Fn(E) -> bool,
    {
        move |t: &T| (self.f)(t).unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedPredicate<T, E2, impl Fn(&T) -> Result<bool, E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedPredicate::of(move |t: &T| (self.f)(t).map_err(&mapper))
    }

    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn(&T) -> bool
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move |t: &T| (self.f)(t).unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    /// Ask `fallback` about the same input when this predicate fails
    pub fn on_error_test_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedPredicate<T, E2, impl Fn(&T) -> Result<bool, E2>>
    where
        G: Fn(&T) -> Result<bool, E2>,
    {
        CheckedPredicate::of(move |t: &T| (self.f)(t).or_else(|_| fallback(t)))
    }

    pub fn on_error_test_unchecked<G>(self, fallback: G) -> impl Fn(&T) -> bool
    where
        G: Fn(&T) -> bool,
    {
        move |t: &T| (self.f)(t).unwrap_or_else(|_| fallback(t))
    }
}

impl<T: ?Sized, E, F: Clone> Clone for CheckedPredicate<T, E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, E, F> fmt::Debug for CheckedPredicate<T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedPredicate").finish_non_exhaustive()
    }
}

/// Whether the input equals `target`
pub fn is_equal<T, E>(target: T) -> CheckedPredicate<T, E, impl Fn(&T) -> Result<bool, E>>
where
    T: PartialEq,
{
    CheckedPredicate::of(move |t: &T| Ok(*t == target))
}

/// The negation of `target`
pub fn not<T: ?Sized, E, G>(target: G) -> CheckedPredicate<T, E, impl Fn(&T) -> Result<bool, E>>
where
    G: Fn(&T) -> Result<bool, E>,
{
    CheckedPredicate::of(target).negate()
}

/// Adapt a plain predicate, recovering any carrier it raises whatever the cause
pub fn checked<T: ?Sized, G>(
    plain: G,
) -> CheckedPredicate<T, Cause, impl Fn(&T) -> Result<bool, Cause>>
where
    G: Fn(&T) -> bool,
{
    CheckedPredicate::of(move |t: &T| carrier::catch_any(|| plain(t)))
}

/// Adapt a plain predicate, recovering carriers whose cause `expected` accepts
pub fn checked_as<T: ?Sized, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedPredicate<T, E, impl Fn(&T) -> Result<bool, E>>
where
    G: Fn(&T) -> bool,
{
    CheckedPredicate::of(move |t: &T| carrier::invoke_and_unwrap(|| plain(t), &expected))
}
