// Copyright (c) 2025 - Cowboy AI, Inc.
//! Single-Occurrence Futures
//!
//! This module provides `Future<A>`: a value that does not exist yet but
//! will exist at one single point in time. It is the occurrence-based
//! counterpart of a continuous Behavior.
//!
//! ```text
//! Time: ────────────────────────────→
//! Value:            ●
//!                 (once)
//! ```
//!
//! # Core Concepts
//!
//! ## Occurrence
//!
//! A future is created pending (except `pure`, created occurred) and
//! occurs exactly once. After occurrence it is an immutable value.
//!
//! ## Push Propagation
//!
//! Derived futures register themselves as consumers of their parents.
//! Resolving a future pushes the value to every consumer in registration
//! order, synchronously and depth-first:
//!
//! ```text
//! sink.resolve(21)
//!   └─> map(x * 2).push(21)
//!         └─> resolve(42)
//!               └─> subscribe(print).push(42)
//! ```
//!
//! Nothing is polled and nothing is queued; `resolve` returns once the
//! entire reachable graph has been updated.
//!
//! ## Combinators
//!
//! | Combinator | Parents | Occurs when |
//! |------------|---------|-------------|
//! | `pure`     | none    | at construction |
//! | `map`      | 1       | parent occurs |
//! | `map_to`   | 1       | parent occurs |
//! | `lift1..4`, `lift_all` | n | all parents occurred |
//! | `chain`    | 1 + 1 dynamic | parent, then the future it returns |
//! | `combine`  | 2       | first parent occurs |
//!
//! # Success Only
//!
//! Futures model success occurrence only. There is no rejection channel:
//! a future whose mapping function panics simply never occurs, and later
//! listeners are never called. Contract violations such as a second
//! `resolve` surface as [`FutureError`](crate::FutureError) values.
//!
//! # Example
//!
//! ```rust,ignore
//! use cim_future::{Future, Sink};
//!
//! let sink = Sink::new();
//! let doubled = sink.map(|x: i32| x * 2);
//! doubled.subscribe(|x| println!("{}", x));
//!
//! sink.resolve(21)?; // prints 42
//! ```

pub mod behavior;
pub mod combinators;
pub mod consumer;
pub mod occurrence;
pub mod sink;

#[cfg(feature = "async")]
pub mod bridge;

pub use self::behavior::{Observable, Observer};
pub use self::combinators::*;
pub use self::consumer::{Consumer, Subscription};
pub use self::occurrence::{Future, FutureState};
pub use self::sink::{Resolver, Sink};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The variant that produces a future's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FutureKind {
    /// Occurred at construction
    Pure,
    /// Resolved imperatively by its owner
    Sink,
    /// Function of one parent
    Map,
    /// Constant replacing one parent's value
    MapTo,
    /// Function of all parents once every one occurred
    Lift,
    /// Value of a future produced from the parent's value
    Chain,
    /// First of two parents to occur
    Combine,
    /// Never occurs
    Never,
    /// Next value of a continuous behavior
    Behavior,
    /// Completion of a foreign asynchronous source
    Async,
}

impl fmt::Display for FutureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FutureKind::Pure => "pure",
            FutureKind::Sink => "sink",
            FutureKind::Map => "map",
            FutureKind::MapTo => "map_to",
            FutureKind::Lift => "lift",
            FutureKind::Chain => "chain",
            FutureKind::Combine => "combine",
            FutureKind::Never => "never",
            FutureKind::Behavior => "behavior",
            FutureKind::Async => "async",
        };
        f.write_str(name)
    }
}
