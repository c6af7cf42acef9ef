//! Push-propagated futures for the Composable Information Machine
//!
//! This crate provides `Future<A>`, a value that will exist at one single
//! point in time, with the combinators (`map`, `map_to`, `lift`, `chain`,
//! `pure`) for building computations on values that do not exist yet, and
//! adapters bridging Behaviors, callbacks and async Rust into it.

pub mod errors;
pub mod future;

// Re-export commonly used types
pub use errors::{FutureError, FutureResult};
pub use future::{
    lift1, lift2, lift3, lift4, lift_all, pure, Consumer, Future, FutureKind, FutureState,
    Observable, Observer, Resolver, Sink, Subscription,
};
