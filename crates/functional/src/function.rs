//! Fallible single-argument functions

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use checked_core::carrier::{self, Cause, Expected};

use crate::throw::throw_unchecked;

/// A function from `T` to `R` that can fail with `E`
///
/// Built with [`CheckedFunction::of`] from any closure returning
/// `Result<R, E>`. The `on_error_*` adapters only ever see `Err(E)`; a panic
/// inside the function passes through all of them untouched.
pub struct CheckedFunction<T, R, E, F> {
    f: F,
    _marker: PhantomData<fn(T) -> Result<R, E>>,
}

impl<T, R, E, F> CheckedFunction<T, R, E, F>
where
    F: Fn(T) -> Result<R, E>,
{
    pub fn of(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }

    pub fn apply(&self, t: T) -> Result<R, E> {
        (self.f)(t)
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    /// Feed the result into `after`
    pub fn and_then<V, G>(self, after: G) -> CheckedFunction<T, V, E, impl Fn(T) -> Result<V, E>>
    where
        G: Fn(R) -> Result<V, E>,
    {
        CheckedFunction::of(move |t: T| (self.f)(t).and_then(&after))
    }

    /// Run `before` first and feed its result into this function
    pub fn compose<V, G>(self, before: G) -> CheckedFunction<V, R, E, impl Fn(V) -> Result<R, E>>
    where
        G: Fn(V) -> Result<T, E>,
    {
        CheckedFunction::of(move |v: V| before(v).and_then(&self.f))
    }

    /// Plain view that raises `Err(e)` as a carrier around `e`
    pub fn unchecked(self) -> impl Fn(T) -> R
    where
        E: Into<Cause>,
    {
        move |t: T| (self.f)(t).unwrap_or_else(|e| carrier::raise(e))
    }

    pub fn on_error_return(self, value: R) -> impl Fn(T) -> R
    where
        R: Clone,
    {
        move |t: T| (self.f)(t).unwrap_or_else(|_| value.clone())
    }

    pub fn on_error_handle_checked<E2, H>(
        self,
        handler: H,
    ) -> CheckedFunction<T, R, E2, impl Fn(T) -> Result<R, E2>>
    where
        H: Fn(E) -> Result<R, E2>,
    {
        CheckedFunction::of(move |t: T| (self.f)(t).or_else(&handler))
    }

    pub fn on_error_handle_unchecked<H>(self, handler: H) -> impl Fn(T) -> R
    where
        H: Fn(E) -> R,
    {
        move |t: T| (self.f)(t).unwrap_or_else(&handler)
    }

    pub fn on_error_throw_as_checked<E2, M>(
        self,
        mapper: M,
    ) -> CheckedFunction<T, R, E2, impl Fn(T) -> Result<R, E2>>
    where
        M: Fn(E) -> E2,
    {
        CheckedFunction::of(move |t: T| (self.f)(t).map_err(&mapper))
    }

    /// Panic with `mapper(e)` as the payload instead of returning `Err(e)`
    pub fn on_error_throw_as_unchecked<X, M>(self, mapper: M) -> impl Fn(T) -> R
    where
        M: Fn(E) -> X,
        X: Any + Send + 'static,
    {
        move |t: T| (self.f)(t).unwrap_or_else(|e| throw_unchecked(mapper(e)))
    }

    /// Retry the same input with `fallback` when this function fails
    pub fn on_error_apply_checked<E2, G>(
        self,
        fallback: G,
    ) -> CheckedFunction<T, R, E2, impl Fn(T) -> Result<R, E2>>
    where
        T: Clone,
        G: Fn(T) -> Result<R, E2>,
    {
        CheckedFunction::of(move |t: T| (self.f)(t.clone()).or_else(|_| fallback(t)))
    }

    pub fn on_error_apply_unchecked<G>(self, fallback: G) -> impl Fn(T) -> R
    where
        T: Clone,
        G: Fn(T) -> R,
    {
        move |t: T| (self.f)(t.clone()).unwrap_or_else(|_| fallback(t))
    }
}

impl<T, R, E, F: Clone> Clone for CheckedFunction<T, R, E, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, R, E, F> fmt::Debug for CheckedFunction<T, R, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedFunction").finish_non_exhaustive()
    }
}

/// The function that returns its input
pub fn identity<T, E>() -> CheckedFunction<T, T, E, fn(T) -> Result<T, E>> {
    let f: fn(T) -> Result<T, E> = Ok;
    CheckedFunction::of(f)
}

/// Adapt a plain function, recovering any carrier it raises whatever the cause
pub fn checked<T, R, G>(plain: G) -> CheckedFunction<T, R, Cause, impl Fn(T) -> Result<R, Cause>>
where
    G: Fn(T) -> R,
{
    CheckedFunction::of(move |t: T| carrier::catch_any(|| plain(t)))
}

/// Adapt a plain function, recovering carriers whose cause `expected` accepts
///
/// Carriers with any other cause are raised again unchanged.
pub fn checked_as<T, R, E, G>(
    plain: G,
    expected: Expected<E>,
) -> CheckedFunction<T, R, E, impl Fn(T) -> Result<R, E>>
where
    G: Fn(T) -> R,
{
    CheckedFunction::of(move |t: T| carrier::invoke_and_unwrap(|| plain(t), &expected))
}
