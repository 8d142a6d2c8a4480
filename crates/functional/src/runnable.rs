//! Fallible actions with no input and no result

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// An action that can fail with `E`
pub struct CheckedRunnable<E, F> {
    f: F,
    _marker: PhantomData<fn() -> Result<(), E>>,
}

impl<E, F> CheckedRunnable<E, F>
where
    F: Fn() -> Result<(), E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn run(&self) -> Result<(), E> {
        (self.f)()
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    /// Run `after` once this action has succeeded
    pub fn and_then<G>(self, after: G) -> CheckedRunnable<E, impl Fn() -> Result<(), E>>
    where
        G: Fn() -> Result<(), E>,
    {
        CheckedRunnable::of(move || (self.f)().and_then(|()| after()))
    }

    pub fn unchecked(self) -> impl Fn()
    where
        E: Into<Cause>,
    {
        move || (self.f)().unwrap_or_else(|e| carrier::raise(e))
    }

    /// Drop `Err` silently
    pub fn on_error_discard(self) -> impl Fn() {
        move || {
            let _ = (self.f)();
        }
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedRunnable<E2, impl Fn() -> Result<(), E2>>
    where
        H: Fn(E) -> Result<(), E2>,
    {
        CheckedRunnable::of(move || (self.f)().or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn()
    where
        H: Fn(E),
    {
        move || (self.f)().unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedRunnable<E2, impl Fn() -> Result<(), E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedRunnable::of(move || (self.f)().map_err(&mapper))
    }

    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn()
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move || (self.f)().unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    /// Run `fallback` instead when this action fails
    pub fn on_error_run_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedRunnable<E2, impl Fn() -> Result<(), E2>>
    where
        G: Fn() -> Result<(), E2>,
    {
        CheckedRunnable::of(move || (self.f)().or_else(|_| fallback()))
    }

    pub fn on_error_run_unchecked<G>(self, fallback: G) -> impl Fn()
    where
        G: Fn(),
    {
        move || (self.f)().unwrap_or_else(|_| fallback())
    }
}

impl<E, F: Clone> Clone for CheckedRunnable<E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E, F> fmt::Debug for CheckedRunnable<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedRunnable").finish_non_exhaustive()
    }
}

/// Adapt a plain action, recovering any carrier it raises whatever the cause
pub fn checked<G>(plain: G) -> CheckedRunnable<Cause, impl Fn() -> Result<(), Cause>>
where
    G: Fn(),
{
    CheckedRunnable::of(move || carrier::catch_any(&plain))
}

/// Adapt a plain action, recovering carriers whose cause `expected` accepts
pub fn checked_as<E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedRunnable<E, impl Fn() -> Result<(), E>>
where
    G: Fn(),
{
    CheckedRunnable::of(move || carrier::invoke_and_unwrap(&plain, &expected))
}
