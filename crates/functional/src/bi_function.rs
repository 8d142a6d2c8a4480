//! Fallible two-argument functions

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// A function from `(T, U)` to `R` that can fail with `E`
pub struct CheckedBiFunction<T, U, R, E, F> {
    f: F,
    _marker: PhantomData<fn(T, U) -> Result<R, E>>,
}

impl<T, U, R, E, F> CheckedBiFunction<T, U, R, E, F>
where
    F: Fn(T, U) -> Result<R, E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn apply(&self, t: T, u: U) -> Result<R, E> {
        (self.f)(t, u)
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    pub fn and_then<V, G>(
        self,
        after: G,
    ) -> CheckedBiFunction<T, U, V, E, impl Fn(T, U) -> Result<V, E>>
    where
        G: Fn(R) -> Result<V, E>,
    {
        CheckedBiFunction::of(move |t: T, u: U| (self.f)(t, u).and_then(&after))
    }

    pub fn unchecked(self) -> impl Fn(T, U) -> R
    where
        E: Into<Cause>,
    {
        move |t: T, u: U| (self.f)(t, u).unwrap_or_else(|e| carrier::raise(e))
    }

    pub fn on_error_return(self, value: R) -> impl Fn(T, U) -> R
    where
        R: Clone,
    {
        move |t: T, u: U| (self.f)(t, u).unwrap_or_else(|_| value.clone())
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedBiFunction<T, U, R, E2, impl Fn(T, U) -> Result<R, E2>>
    where
        H: Fn(E) -> Result<R, E2>,
    {
        CheckedBiFunction::of(move |t: T, u: U| (self.f)(t, u).or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn(T, U) -> R
    where
        H: Fn(E) -> R,
    {
        move |t: T, u: U| (self.f)(t, u).unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedBiFunction<T, U, R, E2, impl Fn(T, U) -> Result<R, E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedBiFunction::of(move |t: T, u: U| (self.f)(t, u).map_err(&mapper))
    }

    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn(T, U) -> R
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move |t: T, u: U| (self.f)(t, u).unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    pub fn on_error_apply_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedBiFunction<T, U, R, E2, impl Fn(T, U) -> Result<R, E2>>
    where
        T: Clone,
        U: Clone,
        G: Fn(T, U) -> Result<R, E2>,
    {
        CheckedBiFunction::of(move |t: T, u: U| {
            (self.f)(t.clone(), u.clone()).or_else(|_| fallback(t, u))
        })
    }

    pub fn on_error_apply_unchecked<G>(self, fallback: G) -> impl Fn(T, U) -> R
    where
        T: Clone,
        U: Clone,
        G: Fn(T, U) -> R,
    {
        move |t: T, u: U| (self.f)(t.clone(), u.clone()).unwrap_or_else(|_| fallback(t, u))
    }
}

impl<T, U, R, E, F: Clone> Clone for CheckedBiFunction<T, U, R, E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, U, R, E, F> fmt::Debug for CheckedBiFunction<T, U, R, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedBiFunction").finish_non_exhaustive()
    }
}

/// Adapt a plain two-argument function, recovering any carrier it raises
pub fn checked<T, U, R, G>(
    plain: G,
) -> CheckedBiFunction<T, U, R, Cause, impl Fn(T, U) -> Result<R, Cause>>
where
    G: Fn(T, U) -> R,
{
    CheckedBiFunction::of(move |t: T, u: U| carrier::catch_any(|| plain(t, u)))
}

/// Adapt a plain two-argument function, recovering carriers whose cause
/// `expected` accepts
pub fn checked_as<T, U, R, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedBiFunction<T, U, R, E, impl Fn(T, U) -> Result<R, E>>
where
    G: Fn(T, U) -> R,
{
    CheckedBiFunction::of(move |t: T, u: U| {
        carrier::invoke_and_unwrap(|| plain(t, u), &expected)
    })
}
