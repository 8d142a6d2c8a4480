//! Fallible consumers

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// A side effect on `&T` that can fail with `E`
pub struct CheckedConsumer<T: ?Sized, E, F> {
    f: F,
    _marker: PhantomData<fn(&T) -> Result<(), E>>,
}

impl<T: ?Sized, E, F> CheckedConsumer<T, E, F>
where
    F: Fn(&T) -> Result<(), E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn accept(&self, t: &T) -> Result<(), E> {
        (self.f)(t)
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    /// Run `after` on the same input once this consumer has succeeded
    ///
    /// When `after` fails, the effect of this consumer has already happened.
    pub fn and_then<G>(self, after: G) -> CheckedConsumer<T, E, impl Fn(&T) -> Result<(), E>>
    where
        G: Fn(&T) -> Result<(), E>,
    {
        CheckedConsumer::of(move |t: &T| (self.f)(t).and_then(|()| after(t)))
    }

    pub fn unchecked(self) -> impl Fn(&T)
    where
        E: Into<Cause>,
    {
        move |t: &T| (self.f)(t).unwrap_or_else(|e| carrier::raise(e))
    }

    /// Drop `Err` silently
    pub fn on_error_discard(self) -> impl Fn(&T) {
        move |t: &T| {
            let _ = (self.f)(t);
        }
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedConsumer<T, E2, impl Fn(&T) -> Result<(), E2>>
    where
        H: Fn(E) -> Result<(), E2>,
    {
        CheckedConsumer::of(move |t: &T| (self.f)(t).or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn(&T)
    where
        H: Fn(E),
    {
        move |t: &T| (self.f)(t).unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedConsumer<T, E2, impl Fn(&T) -> Result<(), E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedConsumer::of(move |t: &T| (self.f)(t).map_err(&mapper))
    }

    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn(&T)
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move |t: &T| (self.f)(t).unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    /// Hand the same input to `fallback` when this consumer fails
    pub fn on_error_accept_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedConsumer<T, E2, impl Fn(&T) -> Result<(), E2>>
    where
        G: Fn(&T) -> Result<(), E2>,
    {
        CheckedConsumer::of(move |t: &T| (self.f)(t).or_else(|_| fallback(t)))
    }

    pub fn on_error_accept_unchecked<G>(self, fallback: G) -> impl Fn(&T)
    where
        G: Fn(&T),
    {
        move |t: &T| (self.f)(t).unwrap_or_else(|_| fallback(t))
    }
}

impl<T: ?Sized, E, F: Clone> Clone for CheckedConsumer<T, E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, E, F> fmt::Debug for CheckedConsumer<T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedConsumer").finish_non_exhaustive()
    }
}

/// Adapt a plain consumer, recovering any carrier it raises whatever the cause
pub fn checked<T: ?Sized, G>(
    plain: G,
) -> CheckedConsumer<T, Cause, impl Fn(&T) -> Result<(), Cause>>
where
    G: Fn(&T),
{
    CheckedConsumer::of(move |t: &T| carrier::catch_any(|| plain(t)))
}

/// Adapt a plain consumer, recovering carriers whose cause `expected` accepts
pub fn checked_as<T: ?Sized, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedConsumer<T, E, impl Fn(&T) -> Result<(), E>>
where
    G: Fn(&T),
{
    CheckedConsumer::of(move |t: &T| carrier::invoke_and_unwrap(|| plain(t), &expected))
}
