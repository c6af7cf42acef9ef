// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sink - imperatively resolved futures
//!
//! A `Sink<A>` is the only way to create a future from scratch that is not
//! already occurred. Its owner calls [`Sink::resolve`] once; everything
//! derived from it updates synchronously inside that call.
//!
//! A [`Resolver<A>`] is the single-use variant handed to foreign callback
//! APIs: it is consumed by resolving, so the type system rules out a
//! second call.

use super::consumer::Consumer;
use super::occurrence::Future;
use super::FutureKind;
use crate::errors::{FutureError, FutureResult};
use std::fmt::{self, Debug};
use std::ops::Deref;
use tracing::{debug, warn};

/// A future resolved directly by caller code
///
/// Derefs to its [`Future`], so combinators can be called on the sink
/// itself.
///
/// # Examples
///
/// ```rust,ignore
/// let sink = Sink::new();
/// let mapped = sink.map(|x: i32| x * 2);
/// sink.resolve(21)?;
/// assert_eq!(mapped.value(), Some(42));
/// ```
#[derive(Clone)]
pub struct Sink<A> {
    future: Future<A>,
}

impl<A: Clone + Send + Sync + 'static> Sink<A> {
    /// Create a pending sink
    pub fn new() -> Self {
        Self {
            future: Future::pending(FutureKind::Sink),
        }
    }

    /// Occur with `value`, driving every derived future
    ///
    /// # Errors
    ///
    /// [`FutureError::AlreadyOccurred`] on a second call, leaving the first
    /// value in place. Any error raised downstream during propagation.
    pub fn resolve(&self, value: A) -> FutureResult<()> {
        self.future.resolve(value)
    }

    /// The future this sink resolves
    pub fn future(&self) -> Future<A> {
        self.future.clone()
    }
}

impl<A: Clone + Send + Sync + 'static> Default for Sink<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Deref for Sink<A> {
    type Target = Future<A>;

    fn deref(&self) -> &Future<A> {
        &self.future
    }
}

impl<A: Debug> Debug for Sink<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sink").field(&self.future).finish()
    }
}

/// A sink is a source: it never consumes another future's value.
impl<A: Clone + Send + Sync + 'static> Consumer<A> for Sink<A> {
    fn push(&self, _value: A) -> FutureResult<()> {
        warn!("push into a sink");
        Err(FutureError::UnexpectedPush {
            kind: FutureKind::Sink,
        })
    }
}

/// Single-use handle resolving one future
pub struct Resolver<A> {
    future: Future<A>,
}

impl<A: Clone + Send + Sync + 'static> Resolver<A> {
    /// Occur with `value`
    ///
    /// # Errors
    ///
    /// Errors raised downstream during propagation.
    pub fn resolve(self, value: A) -> FutureResult<()> {
        self.future.resolve(value)
    }
}

impl<A> Debug for Resolver<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolver<{}>", std::any::type_name::<A>())
    }
}

impl<A: Clone + Send + Sync + 'static> Future<A> {
    /// Adapt a foreign "call me back once" source
    ///
    /// `register` receives a [`Resolver`] and arranges for the source's
    /// completion to call it. If the source never completes, the future
    /// never occurs.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let future = Future::from_callback(|resolver| {
    ///     legacy_api.on_done(move |result| {
    ///         let _ = resolver.resolve(result);
    ///     });
    /// });
    /// ```
    pub fn from_callback<R>(register: R) -> Self
    where
        R: FnOnce(Resolver<A>),
    {
        let future = Future::pending(FutureKind::Async);
        debug!("wiring callback source");
        register(Resolver {
            future: future.clone(),
        });
        future
    }
}
