// Copyright (c) 2025 - Cowboy AI, Inc.
//! Future Combinators
//!
//! This module provides the combinators that build derived futures on top
//! of not-yet-available values. Each combinator wires a node as a consumer
//! of its parent(s); the node computes its value on push and resolves its
//! own output future exactly once.
//!
//! # Available Combinators
//!
//! ## Methods on `Future<A>`
//! - `map` - Transform the value (Functor)
//! - `map_to` - Replace the value with a constant
//! - `chain` - Continue with a future produced from the value (Monad)
//! - `combine` - Occur with whichever of two futures occurs first
//! - `flatten` - Collapse a future of a future
//!
//! ## Free Functions
//! - `pure` - A future that has already occurred
//! - `lift1` .. `lift4` - Combine the values of several futures once all occurred
//! - `lift_all` - N-ary lift over futures of one type
//!
//! # Examples
//!
//! ## Joining Futures
//!
//! ```rust,ignore
//! use cim_future::*;
//!
//! let a = Sink::new();
//! let b = Sink::new();
//! let sum = lift2(&a, &b, |x: i32, y: i32| x + y);
//!
//! b.resolve(4)?;
//! assert!(!sum.occurred());
//! a.resolve(3)?;
//! assert_eq!(sum.value(), Some(7));
//! ```
//!
//! ## Sequencing
//!
//! ```rust,ignore
//! let user_id = Sink::new();
//! let profile = user_id.chain(|id: u64| fetch_profile(id));
//! ```

use super::consumer::Consumer;
use super::occurrence::Future;
use super::FutureKind;
use crate::errors::{FutureError, FutureResult};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

struct MapNode<A, B, F> {
    f: F,
    out: Future<B>,
    _input: PhantomData<fn(A)>,
}

impl<A, B, F> Consumer<A> for MapNode<A, B, F>
where
    B: Clone + Send + Sync + 'static,
    F: Fn(A) -> B + Send + Sync,
{
    fn push(&self, value: A) -> FutureResult<()> {
        self.out.resolve((self.f)(value))
    }
}

struct MapToNode<B> {
    value: B,
    out: Future<B>,
}

impl<A, B> Consumer<A> for MapToNode<B>
where
    B: Clone + Send + Sync + 'static,
{
    fn push(&self, _value: A) -> FutureResult<()> {
        self.out.resolve(self.value.clone())
    }
}

/// Values delivered so far, one slot per parent position.
struct LiftSlots<S> {
    values: S,
    missing: usize,
}

/// Joins n parents; fires on the delivery that fills the last slot.
///
/// The node holds no parent handle. Each parent owns an input feeding its
/// position, so a lift whose parents never all occur is freed with them.
struct LiftNode<S, V, B, F> {
    slots: Mutex<LiftSlots<S>>,
    gather: fn(&mut S) -> Option<V>,
    f: F,
    out: Future<B>,
}

impl<S, V, B, F> LiftNode<S, V, B, F>
where
    B: Clone + Send + Sync + 'static,
    F: Fn(V) -> B,
{
    fn new(values: S, arity: usize, gather: fn(&mut S) -> Option<V>, f: F) -> Arc<Self> {
        Arc::new(Self {
            slots: Mutex::new(LiftSlots {
                values,
                missing: arity,
            }),
            gather,
            f,
            out: Future::pending(FutureKind::Lift),
        })
    }

    /// Store one parent's value, then fire if it was the last one missing
    fn deliver(&self, store: impl FnOnce(&mut S)) -> FutureResult<()> {
        let ready = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            store(&mut slots.values);
            slots.missing = slots.missing.saturating_sub(1);
            if slots.missing == 0 {
                (self.gather)(&mut slots.values)
            } else {
                None
            }
        };
        match ready {
            Some(values) => self.out.resolve((self.f)(values)),
            None => Ok(()),
        }
    }
}

/// Feeds one parent's value into its position of a lift.
struct LiftInput<T, D> {
    deliver: D,
    _value: PhantomData<fn(T)>,
}

impl<T, D> Consumer<T> for LiftInput<T, D>
where
    D: Fn(T) -> FutureResult<()> + Send + Sync,
{
    fn push(&self, value: T) -> FutureResult<()> {
        (self.deliver)(value)
    }
}

fn lift_input<T, D>(deliver: D) -> Arc<LiftInput<T, D>>
where
    D: Fn(T) -> FutureResult<()> + Send + Sync,
{
    Arc::new(LiftInput {
        deliver,
        _value: PhantomData,
    })
}

/// First stage of a chain: binds the parent's value to a second future.
struct ChainNode<A, B, F> {
    bind: F,
    bound: AtomicBool,
    out: Future<B>,
    _input: PhantomData<fn(A)>,
}

impl<A, B, F> Consumer<A> for ChainNode<A, B, F>
where
    B: Clone + Send + Sync + 'static,
    F: Fn(A) -> Future<B> + Send + Sync,
{
    fn push(&self, value: A) -> FutureResult<()> {
        if self.bound.swap(true, Ordering::SeqCst) {
            return Err(FutureError::UnexpectedPush {
                kind: FutureKind::Chain,
            });
        }
        let second = (self.bind)(value);
        second.listen(Arc::new(Relay {
            out: self.out.clone(),
        }))
    }
}

/// Second stage of a chain: forwards the produced future's value.
struct Relay<B> {
    out: Future<B>,
}

impl<B: Clone + Send + Sync + 'static> Consumer<B> for Relay<B> {
    fn push(&self, value: B) -> FutureResult<()> {
        self.out.resolve(value)
    }
}

struct CombineNode<A> {
    settled: AtomicBool,
    out: Future<A>,
}

impl<A: Clone + Send + Sync + 'static> Consumer<A> for CombineNode<A> {
    fn push(&self, value: A) -> FutureResult<()> {
        if self.settled.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.out.resolve(value)
    }
}

impl<A: Clone + Send + Sync + 'static> Future<A> {
    /// Apply a function to the value once it occurs
    ///
    /// The mapped future occurs in the same synchronous step as `self`.
    ///
    /// # Laws
    ///
    /// `f.map(g).map(h)` occurs with the same value at the same time as
    /// `f.map(|x| h(g(x)))`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let doubled = Future::pure(5).map(|x| x * 2);
    /// assert_eq!(doubled.value(), Some(10));
    /// ```
    pub fn map<B, F>(&self, f: F) -> Future<B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let out = Future::pending(FutureKind::Map);
        self.wire(Arc::new(MapNode {
            f,
            out: out.clone(),
            _input: PhantomData,
        }));
        out
    }

    /// Occur with `value` when `self` occurs, ignoring its payload
    pub fn map_to<B>(&self, value: B) -> Future<B>
    where
        B: Clone + Send + Sync + 'static,
    {
        let out = Future::pending(FutureKind::MapTo);
        self.wire(Arc::new(MapToNode {
            value,
            out: out.clone(),
        }));
        out
    }

    /// Continue with the future `bind` produces from the value
    ///
    /// The result occurs once `self` has occurred and the future returned
    /// by `bind` has occurred. If `bind` returns an occurred future, the
    /// result occurs in the same synchronous step as `self`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let request = Sink::new();
    /// let response = request.chain(|req: Request| send(req));
    /// ```
    pub fn chain<B, F>(&self, bind: F) -> Future<B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> Future<B> + Send + Sync + 'static,
    {
        let out = Future::pending(FutureKind::Chain);
        self.wire(Arc::new(ChainNode {
            bind,
            bound: AtomicBool::new(false),
            out: out.clone(),
            _input: PhantomData,
        }));
        out
    }

    /// Occur with whichever of `self` and `other` occurs first
    ///
    /// The later occurrence is ignored. When both have already occurred,
    /// `self` wins.
    pub fn combine(&self, other: &Future<A>) -> Future<A> {
        let node = Arc::new(CombineNode {
            settled: AtomicBool::new(false),
            out: Future::pending(FutureKind::Combine),
        });
        self.wire(node.clone());
        other.wire(node.clone());
        node.out.clone()
    }
}

impl<A: Clone + Send + Sync + 'static> Future<Future<A>> {
    /// Occur with the value of the inner future
    pub fn flatten(&self) -> Future<A> {
        self.chain(|inner| inner)
    }
}

/// Create a future that has already occurred
///
/// This is a convenience wrapper around `Future::pure`.
pub fn pure<A: Clone + Send + Sync + 'static>(value: A) -> Future<A> {
    Future::pure(value)
}

/// Lift a unary function over one future
pub fn lift1<T, R, F>(a: &Future<T>, f: F) -> Future<R>
where
    T: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    let node = LiftNode::new(None, 1, |slot: &mut Option<T>| slot.take(), f);
    let n = node.clone();
    a.wire(lift_input(move |x: T| n.deliver(|slot| *slot = Some(x))));
    node.out.clone()
}

/// Combine two futures using a binary function
///
/// The result occurs once both futures have occurred, in either order.
///
/// # Examples
///
/// ```rust,ignore
/// let sum = lift2(&Future::pure(3), &Future::pure(4), |a, b| a + b);
/// assert_eq!(sum.value(), Some(7));
/// ```
pub fn lift2<T, U, R, F>(a: &Future<T>, b: &Future<U>, f: F) -> Future<R>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(T, U) -> R + Send + Sync + 'static,
{
    let node = LiftNode::new(
        (None, None),
        2,
        |s: &mut (Option<T>, Option<U>)| Some((s.0.take()?, s.1.take()?)),
        move |(x, y): (T, U)| f(x, y),
    );
    let n = node.clone();
    a.wire(lift_input(move |x: T| n.deliver(|s| s.0 = Some(x))));
    let n = node.clone();
    b.wire(lift_input(move |y: U| n.deliver(|s| s.1 = Some(y))));
    node.out.clone()
}

/// Combine three futures using a ternary function
pub fn lift3<T, U, V, R, F>(a: &Future<T>, b: &Future<U>, c: &Future<V>, f: F) -> Future<R>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(T, U, V) -> R + Send + Sync + 'static,
{
    let node = LiftNode::new(
        (None, None, None),
        3,
        |s: &mut (Option<T>, Option<U>, Option<V>)| {
            Some((s.0.take()?, s.1.take()?, s.2.take()?))
        },
        move |(x, y, z): (T, U, V)| f(x, y, z),
    );
    let n = node.clone();
    a.wire(lift_input(move |x: T| n.deliver(|s| s.0 = Some(x))));
    let n = node.clone();
    b.wire(lift_input(move |y: U| n.deliver(|s| s.1 = Some(y))));
    let n = node.clone();
    c.wire(lift_input(move |z: V| n.deliver(|s| s.2 = Some(z))));
    node.out.clone()
}

/// Combine four futures
pub fn lift4<T, U, V, W, R, F>(
    a: &Future<T>,
    b: &Future<U>,
    c: &Future<V>,
    d: &Future<W>,
    f: F,
) -> Future<R>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    W: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(T, U, V, W) -> R + Send + Sync + 'static,
{
    let node = LiftNode::new(
        (None, None, None, None),
        4,
        |s: &mut (Option<T>, Option<U>, Option<V>, Option<W>)| {
            Some((s.0.take()?, s.1.take()?, s.2.take()?, s.3.take()?))
        },
        move |(x, y, z, w): (T, U, V, W)| f(x, y, z, w),
    );
    let n = node.clone();
    a.wire(lift_input(move |x: T| n.deliver(|s| s.0 = Some(x))));
    let n = node.clone();
    b.wire(lift_input(move |y: U| n.deliver(|s| s.1 = Some(y))));
    let n = node.clone();
    c.wire(lift_input(move |z: V| n.deliver(|s| s.2 = Some(z))));
    let n = node.clone();
    d.wire(lift_input(move |w: W| n.deliver(|s| s.3 = Some(w))));
    node.out.clone()
}

/// Combine any number of futures of one type
///
/// `f` receives the values in `parents` order. With no parents the result
/// has already occurred with `f(vec![])`.
pub fn lift_all<T, R, F>(parents: &[Future<T>], f: F) -> Future<R>
where
    T: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(Vec<T>) -> R + Send + Sync + 'static,
{
    if parents.is_empty() {
        return Future::pure(f(Vec::new()));
    }

    let node = LiftNode::new(
        vec![None; parents.len()],
        parents.len(),
        |slots: &mut Vec<Option<T>>| -> Option<Vec<T>> {
            slots.iter_mut().map(Option::take).collect()
        },
        f,
    );
    for (position, parent) in parents.iter().enumerate() {
        let n = node.clone();
        parent.wire(lift_input(move |value: T| {
            n.deliver(|slots| slots[position] = Some(value))
        }));
    }
    node.out.clone()
}
