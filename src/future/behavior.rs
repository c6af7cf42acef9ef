// Copyright (c) 2025 - Cowboy AI, Inc.
//! Behavior Bridge - the next value of a continuous signal as a future
//!
//! Continuous-time values (Behaviors) live outside this crate. A Behavior
//! is consumed only through the narrow [`Observable`] capability: it can
//! register and deregister [`Observer`]s and pushes the next value to them.
//!
//! ```text
//! Behavior: ≈≈≈≈≈≈≈≈≈≈●≈≈≈≈≈●≈≈≈≈●≈≈≈
//!                     │
//! Future:             ● (first change only)
//! ```
//!
//! The bridge future deregisters itself from the Behavior before it
//! resolves, so it never observes a second value even if the Behavior
//! notifies re-entrantly.

use super::occurrence::Future;
use super::FutureKind;
use crate::errors::{FutureError, FutureResult};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Observer registered on a continuous-value source
pub trait Observer<A>: Send + Sync {
    /// The source changed to `value`
    fn push(&self, value: A) -> FutureResult<()>;

    /// Downward state-change notification used between Behaviors
    fn push_down(&self) -> FutureResult<()>;
}

/// A continuous-value source that notifies observers of changes
///
/// Implementations compare observers by identity (`Arc::ptr_eq`) when
/// removing them.
pub trait Observable<A> {
    /// Start notifying `observer`
    fn add_listener(&self, observer: Arc<dyn Observer<A>>);

    /// Stop notifying `observer`
    fn remove_listener(&self, observer: &Arc<dyn Observer<A>>);
}

struct BehaviorNode<A, S> {
    source: Weak<S>,
    this: Weak<BehaviorNode<A, S>>,
    out: Future<A>,
}

impl<A, S> Observer<A> for BehaviorNode<A, S>
where
    A: Clone + Send + Sync + 'static,
    S: Observable<A> + Send + Sync + 'static,
{
    fn push(&self, value: A) -> FutureResult<()> {
        if let (Some(source), Some(this)) = (self.source.upgrade(), self.this.upgrade()) {
            let observer: Arc<dyn Observer<A>> = this;
            source.remove_listener(&observer);
            debug!("behavior future deregistered from its source");
        }
        self.out.resolve(value)
    }

    fn push_down(&self) -> FutureResult<()> {
        warn!("downward push into a behavior future");
        Err(FutureError::UnsupportedSignal {
            kind: FutureKind::Behavior,
        })
    }
}

impl<A: Clone + Send + Sync + 'static> Future<A> {
    /// The next value pushed by `source`
    ///
    /// Registers an observer on `source`; the first push deregisters it and
    /// resolves the future. The future does not keep `source` alive.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let position: Arc<MouseBehavior> = ...;
    /// let next_move = Future::from_behavior(&position);
    /// ```
    pub fn from_behavior<S>(source: &Arc<S>) -> Self
    where
        S: Observable<A> + Send + Sync + 'static,
    {
        let out = Future::pending(FutureKind::Behavior);
        let node = Arc::new_cyclic(|this| BehaviorNode {
            source: Arc::downgrade(source),
            this: this.clone(),
            out: out.clone(),
        });
        source.add_listener(node);
        debug!("behavior future registered on its source");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Minimal push-based source for exercising the bridge
    struct TestBehavior<A> {
        observers: Mutex<Vec<Arc<dyn Observer<A>>>>,
    }

    impl<A: Clone> TestBehavior<A> {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                observers: Mutex::new(Vec::new()),
            })
        }

        fn set(&self, value: A) -> FutureResult<()> {
            let observers = self.observers.lock().unwrap().clone();
            for observer in observers {
                observer.push(value.clone())?;
            }
            Ok(())
        }

        fn observer_count(&self) -> usize {
            self.observers.lock().unwrap().len()
        }
    }

    impl<A> Observable<A> for TestBehavior<A> {
        fn add_listener(&self, observer: Arc<dyn Observer<A>>) {
            self.observers.lock().unwrap().push(observer);
        }

        fn remove_listener(&self, observer: &Arc<dyn Observer<A>>) {
            self.observers
                .lock()
                .unwrap()
                .retain(|o| !Arc::ptr_eq(o, observer));
        }
    }

    #[test]
    fn test_from_behavior_takes_first_value() {
        let behavior = TestBehavior::new();
        let next = Future::from_behavior(&behavior);
        assert_eq!(behavior.observer_count(), 1);
        assert!(!next.occurred());

        behavior.set(1).unwrap();
        assert_eq!(next.value(), Some(1));
        assert_eq!(next.kind(), FutureKind::Behavior);
        assert_eq!(behavior.observer_count(), 0);

        behavior.set(2).unwrap();
        assert_eq!(next.value(), Some(1));
    }

    #[test]
    fn test_from_behavior_rejects_push_down() {
        let behavior: Arc<TestBehavior<i32>> = TestBehavior::new();
        let _next = Future::from_behavior(&behavior);

        let observer = behavior.observers.lock().unwrap()[0].clone();
        assert_eq!(
            observer.push_down().unwrap_err(),
            FutureError::UnsupportedSignal { kind: FutureKind::Behavior }
        );
    }

    #[test]
    fn test_from_behavior_reentrant_source() {
        let behavior: Arc<TestBehavior<i32>> = TestBehavior::new();
        let next = Future::from_behavior(&behavior);

        // The source changes again from inside the first notification.
        let inner = behavior.clone();
        next.subscribe(move |x| {
            inner.set(x + 1).unwrap();
        });

        behavior.set(1).unwrap();
        assert_eq!(next.value(), Some(1));
    }

    #[test]
    fn test_from_behavior_does_not_keep_source_alive() {
        let behavior: Arc<TestBehavior<i32>> = TestBehavior::new();
        let next = Future::from_behavior(&behavior);
        let weak = Arc::downgrade(&behavior);

        drop(behavior);
        assert!(weak.upgrade().is_none());
        assert!(!next.occurred());
    }
}
