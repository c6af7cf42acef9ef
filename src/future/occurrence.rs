// Copyright (c) 2025 - Cowboy AI, Inc.
//! Occurrence - state, storage and listener propagation
//!
//! A `Future<A>` is a handle to a shared core holding the occurrence state.
//! Before occurrence the core owns the ordered list of registered
//! consumers; resolving swaps the list out for the value, then pushes the
//! value to every consumer in registration order.
//!
//! # State Machine
//!
//! ```text
//! Pending(listeners) ──resolve(v)──> Occurred(v)
//!        │                              │
//!  listen: append                 listen: push(v) now
//! ```
//!
//! The mutex guarding the state is released before any consumer runs, so
//! consumers may re-enter `listen` or `resolve` on any future (including
//! this one) without deadlock. Consumers registered during propagation see
//! the occurred state and are pushed to immediately.

use super::consumer::{Consumer, Subscription};
use super::FutureKind;
use crate::errors::{FutureError, FutureResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, trace, warn};

/// Snapshot of a future's occurrence state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FutureState<A> {
    /// The future has not occurred yet
    Pending,
    /// The future occurred with this value
    Occurred(A),
}

impl<A> FutureState<A> {
    /// Whether this snapshot holds a value
    pub fn is_occurred(&self) -> bool {
        matches!(self, FutureState::Occurred(_))
    }
}

enum Slot<A> {
    Pending(Vec<Arc<dyn Consumer<A>>>),
    Occurred(A),
}

struct Core<A> {
    kind: FutureKind,
    slot: Mutex<Slot<A>>,
}

impl<A> Core<A> {
    fn lock(&self) -> MutexGuard<'_, Slot<A>> {
        // Consumers never run under the lock, so a poisoned guard still
        // holds a consistent slot.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A value that occurs at a single moment in time
///
/// # Type Parameters
///
/// - `A`: The value carried by the occurrence (must be Clone + Send + Sync)
///
/// # Implementation
///
/// `Future` is a cheap handle around `Arc`; clones share one occurrence.
/// A pending future owns its consumers, so derived futures stay alive as
/// long as some producer upstream of them can still fire.
pub struct Future<A> {
    core: Arc<Core<A>>,
}

impl<A> Clone for Future<A> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<A: Debug> Debug for Future<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.core.lock() {
            Slot::Pending(listeners) => f
                .debug_struct("Future")
                .field("kind", &self.core.kind)
                .field("listeners", &listeners.len())
                .finish(),
            Slot::Occurred(value) => f
                .debug_struct("Future")
                .field("kind", &self.core.kind)
                .field("value", value)
                .finish(),
        }
    }
}

impl<A: Clone + Send + Sync + 'static> Future<A> {
    pub(crate) fn pending(kind: FutureKind) -> Self {
        Self {
            core: Arc::new(Core {
                kind,
                slot: Mutex::new(Slot::Pending(Vec::new())),
            }),
        }
    }

    /// Create a future that has already occurred with `value`
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let answer = Future::pure(42);
    /// assert_eq!(answer.value(), Some(42));
    /// ```
    pub fn pure(value: A) -> Self {
        Self {
            core: Arc::new(Core {
                kind: FutureKind::Pure,
                slot: Mutex::new(Slot::Occurred(value)),
            }),
        }
    }

    /// Create a future that never occurs
    pub fn never() -> Self {
        Self::pending(FutureKind::Never)
    }

    /// The variant that produces this future's value
    pub fn kind(&self) -> FutureKind {
        self.core.kind
    }

    /// Whether the future has occurred
    pub fn occurred(&self) -> bool {
        matches!(&*self.core.lock(), Slot::Occurred(_))
    }

    /// The occurred value, if any
    pub fn value(&self) -> Option<A> {
        match &*self.core.lock() {
            Slot::Occurred(value) => Some(value.clone()),
            Slot::Pending(_) => None,
        }
    }

    /// Snapshot of the occurrence state
    pub fn state(&self) -> FutureState<A> {
        match self.value() {
            Some(value) => FutureState::Occurred(value),
            None => FutureState::Pending,
        }
    }

    /// Register a consumer
    ///
    /// Before occurrence the consumer is appended to the listener list and
    /// is pushed to when the future resolves. After occurrence it is pushed
    /// the stored value immediately, before `listen` returns.
    ///
    /// # Errors
    ///
    /// Only errors raised by the consumer during an immediate push.
    pub fn listen(&self, consumer: Arc<dyn Consumer<A>>) -> FutureResult<()> {
        match self.register(consumer.clone()) {
            Some(value) => consumer.push(value),
            None => Ok(()),
        }
    }

    /// Run `effect` with the value once the future occurs
    ///
    /// Subscribing twice runs both effects, once each.
    pub fn subscribe<F>(&self, effect: F)
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        self.wire(Arc::new(Subscription::new(effect)));
    }

    /// Append `consumer`, or hand back the value if already occurred
    fn register(&self, consumer: Arc<dyn Consumer<A>>) -> Option<A> {
        match &mut *self.core.lock() {
            Slot::Pending(listeners) => {
                listeners.push(consumer);
                None
            }
            Slot::Occurred(value) => Some(value.clone()),
        }
    }

    /// Register a consumer whose own output has no listeners yet
    ///
    /// An immediate push can only reach the fresh consumer, which never
    /// fails, so construction paths stay infallible. Debug builds assert it.
    pub(crate) fn wire(&self, consumer: Arc<dyn Consumer<A>>) {
        let result = self.listen(consumer);
        debug_assert!(
            result.is_ok(),
            "push into a freshly wired consumer failed: {:?}",
            result
        );
        if let Err(err) = result {
            error!(kind = %self.core.kind, %err, "push into a freshly wired consumer failed");
        }
    }

    /// Occur with `value` and push it to every registered consumer
    ///
    /// # Errors
    ///
    /// Returns [`FutureError::AlreadyOccurred`] if the future has occurred;
    /// the stored value is left untouched and nobody is notified. Errors
    /// from consumers propagate and stop the remaining pushes.
    pub(crate) fn resolve(&self, value: A) -> FutureResult<()> {
        let listeners = {
            let mut slot = self.core.lock();
            match mem::replace(&mut *slot, Slot::Occurred(value.clone())) {
                Slot::Pending(listeners) => listeners,
                Slot::Occurred(stored) => {
                    *slot = Slot::Occurred(stored);
                    warn!(kind = %self.core.kind, "resolve called on an occurred future");
                    return Err(FutureError::AlreadyOccurred {
                        kind: self.core.kind,
                    });
                }
            }
        };

        trace!(kind = %self.core.kind, listeners = listeners.len(), "future occurred");

        for listener in listeners {
            listener.push(value.clone())?;
        }
        Ok(())
    }
}

/// Future handles are outputs: pushing into one is a contract violation.
impl<A: Clone + Send + Sync + 'static> Consumer<A> for Future<A> {
    fn push(&self, _value: A) -> FutureResult<()> {
        warn!(kind = %self.core.kind, "push into a future handle");
        Err(FutureError::UnexpectedPush {
            kind: self.core.kind,
        })
    }
}
