//! Fallible suppliers

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// A zero-argument operation producing `R` that can fail with `E`
pub struct CheckedSupplier<R, E, F> {
    f: F,
    _marker: PhantomData<fn() -> Result<R, E>>,
}

impl<R, E, F> CheckedSupplier<R, E, F>
where
    F: Fn() -> Result<R, E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> Result<R, E> {
        (self.f)()
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    pub fn unchecked(self) -> impl Fn() -> R
    where
        E: Into<Cause>,
    {
        move || (self.f)().unwrap_or_else(|e| carrier::raise(e))
    }

    pub fn on_error_return(self, value: R) -> impl Fn() -> R
    where
        R: Clone,
    {
        move || (self.f)().unwrap_or_else(|_| value.clone())
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedSupplier<R, E2, impl Fn() -> Result<R, E2>>
    where
        H: Fn(E) -> Result<R, E2>,
    {
        CheckedSupplier::of(move || (self.f)().or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn() -> R
    where
        H: Fn(E) -> R,
    {
        move || (self.f)().unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedSupplier<R, E2, impl Fn() -> Result<R, E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedSupplier::of(move || (self.f)().map_err(&mapper))
    }

    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn() -> R
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move || (self.f)().unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    /// Ask `fallback` instead when this supplier fails
    pub fn on_error_get_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedSupplier<R, E2, impl Fn() -> Result<R, E2>>
    where
        G: Fn() -> Result<R, E2>,
    {
        CheckedSupplier::of(move || (self.f)().or_else(|_| fallback()))
    }

    pub fn on_error_get_unchecked<G>(self, fallback: G) -> impl Fn() -> R
    where
        G: Fn() -> R,
    {
        move || (self.f)().unwrap_or_else(|_| fallback())
    }
}

impl<R, E, F: Clone> Clone for CheckedSupplier<R, E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R, E, F> fmt::Debug for CheckedSupplier<R, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedSupplier").finish_non_exhaustive()
    }
}

/// Adapt a plain supplier, recovering any carrier it raises whatever the cause
pub fn checked<R, G>(plain: G) -> CheckedSupplier<R, Cause, impl Fn() -> Result<R, Cause>>
where
    G: Fn() -> R,
{
    CheckedSupplier::of(move || carrier::catch_any(&plain))
}

/// Adapt a plain supplier, recovering carriers whose cause `expected` accepts
pub fn checked_as<R, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedSupplier<R, E, impl Fn() -> Result<R, E>>
where
    G: Fn() -> R,
{
    CheckedSupplier::of(move || carrier::invoke_and_unwrap(&plain, &expected))
}
