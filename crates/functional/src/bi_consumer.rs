//! Fallible two-argument consumers

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// A side effect on `(&T, &U)` that can fail with `E`
pub struct CheckedBiConsumer<T: ?Sized, U: ?Sized, E, F> {
    f: F,
    _marker: PhantomData<fn(&T, &U) -> Result<(), E>>,
}

impl<T: ?Sized, U: ?Sized, E, F> CheckedBiConsumer<T, U, E, F>
where
    F: Fn(&T, &U) -> Result<(), E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn accept(&self, t: &T, u: &U) -> Result<(), E> {
        (self.f)(t, u)
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    /// Run `after` on the same input once this consumer has succeeded
    ///
    /// When `after` fails, the effect of this consumer has already happened.
    pub fn and_then<G>(
        self,
        after: G,
    ) -> CheckedBiConsumer<T, U, E, impl Fn(&T, &U) -> Result<(), E>>
    where
        G: Fn(&T, &U) -> Result<(), E>,
    {
        CheckedBiConsumer::of(move |t: &T, u: &U| {
            (self.f)(t, u).and_then(|()| after(t, u))
        })
    }

    pub fn unchecked(self) -> impl Fn(&T, &U)
    where
        E: Into<Cause>,
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(|e| carrier::raise(e))
    }

    /// Drop `Err` silently
    pub fn on_error_discard(self) -> impl Fn(&T, &U) {
        move |t: &T, u: &U| {
            let _ = (self.f)(t, u);
        }
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedBiConsumer<T, U, E2, impl Fn(&T, &U) -> Result<(), E2>>
    where
        H: Fn(E) -> Result<(), E2>,
    {
        CheckedBiConsumer::of(move |t: &T, u: &U| (self.f)(t, u).or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn(&T, &U)
    where
        H: Fn(E),
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedBiConsumer<T, U, E2, impl Fn(&T, &U) -> Result<(), E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedBiConsumer::of(move |t: &T, u: &U| (self.f)(t, u).map_err(&mapper))
    }

    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn(&T, &U)
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    /// Hand the same input to `fallback` when this consumer fails
    pub fn on_error_accept_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedBiConsumer<T, U, E2, impl Fn(&T, &U) -> Result<(), E2>>
    where
        G: Fn(&T, &U) -> Result<(), E2>,
    {
        CheckedBiConsumer::of(move |t: &T, u: &U| {
            (self.f)(t, u).or_else(|_| fallback(t, u))
        })
    }

    pub fn on_error_accept_unchecked<G>(self, fallback: G) -> impl Fn(&T, &U)
    where
        G: Fn(&T, &U),
    {
        move |t: &T, u: &U| (self.f)(t, u).unwrap_or_else(|_| fallback(t, u))
    }
}

impl<T: ?Sized, U: ?Sized, E, F: Clone> Clone for CheckedBiConsumer<T, U, E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, U: ?Sized, E, F> fmt::Debug for CheckedBiConsumer<T, U, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedBiConsumer").finish_non_exhaustive()
    }
}

/// Adapt a plain two-argument consumer, recovering any carrier it raises
pub fn checked<T: ?Sized, U: ?Sized, G>(
    plain: G,
) -> CheckedBiConsumer<T, U, Cause, impl Fn(&T, &U) -> Result<(), Cause>>
where
    G: Fn(&T, &U),
{
    CheckedBiConsumer::of(move |t: &T, u: &U| carrier::catch_any(|| plain(t, u)))
}

/// Adapt a plain two-argument consumer, recovering carriers whose cause
/// `expected` accepts
pub fn checked_as<T: ?Sized, U: ?Sized, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedBiConsumer<T, U, E, impl Fn(&T, &U) -> Result<(), E>>
where
    G: Fn(&T, &U),
{
    CheckedBiConsumer::of(move |t: &T, u: &U| {
        carrier::invoke_and_unwrap(|| plain(t, u), &expected)
    })
}
