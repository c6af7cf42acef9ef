// Copyright (c) 2025 - Cowboy AI, Inc.
//! Consumer Trait - the receiving end of a push
//!
//! A `Consumer<A>` is anything registered on a future to receive its value
//! once it occurs. Derived futures are consumers of their parents; a
//! [`Subscription`] is the terminal consumer that performs a side effect
//! instead of resolving anything further.
//!
//! # Propagation
//!
//! ```text
//! Sink ──push──> MapNode ──resolve──> Future<B> ──push──> Subscription
//!                                             └──push──> LiftInput ...
//! ```
//!
//! Pushes are synchronous and depth-first: a single `resolve` drives the
//! whole reachable graph before it returns.

use crate::errors::FutureResult;
use std::fmt;
use std::marker::PhantomData;

/// Receiver of exactly one pushed value
///
/// Implementors are registered through [`Future::listen`](super::Future::listen)
/// and are pushed to at most once per producer they are registered on.
///
/// # Errors
///
/// Returning an error aborts propagation: the error travels back out
/// through every `resolve` and `push` frame that led to this call.
pub trait Consumer<A>: Send + Sync {
    /// Receive the producer's value
    fn push(&self, value: A) -> FutureResult<()>;
}

/// Terminal consumer running a side effect with the pushed value
///
/// Created by [`Future::subscribe`](super::Future::subscribe). The effect
/// runs exactly once, synchronously inside whatever call made the future
/// occur. A panic inside the effect propagates to that caller.
pub struct Subscription<A, F> {
    effect: F,
    _value: PhantomData<fn(A)>,
}

impl<A, F> Subscription<A, F>
where
    F: Fn(A) + Send + Sync,
{
    /// Wrap a side-effecting function as a consumer
    pub fn new(effect: F) -> Self {
        Self {
            effect,
            _value: PhantomData,
        }
    }
}

impl<A, F> Consumer<A> for Subscription<A, F>
where
    F: Fn(A) + Send + Sync,
{
    fn push(&self, value: A) -> FutureResult<()> {
        (self.effect)(value);
        Ok(())
    }
}

impl<A, F> fmt::Debug for Subscription<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription<{}>", std::any::type_name::<A>())
    }
}
