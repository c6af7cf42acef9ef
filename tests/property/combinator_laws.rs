// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Combinator Laws
//!
//! Functor and monad laws for `map` and `chain`, and firing-order
//! independence for `lift`.

use cim_future::{lift3, lift_all, pure, Future, Sink};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate parent values together with a resolution order
fn values_and_order() -> impl Strategy<Value = (Vec<i32>, Vec<usize>)> {
    prop::collection::vec(-1000i32..1000, 1..8).prop_flat_map(|values| {
        let order: Vec<usize> = (0..values.len()).collect();
        (Just(values), Just(order).prop_shuffle())
    })
}

/// Generate a permutation of three parent indices
fn order_of_three() -> impl Strategy<Value = Vec<usize>> {
    Just(vec![0usize, 1, 2]).prop_shuffle()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: map composition
    ///
    /// `f.map(g).map(h)` occurs with the same value, in the same resolve
    /// call, as `f.map(|x| h(g(x)))`.
    #[test]
    fn prop_map_composition(value in any::<i32>(), a in -50i32..50, b in -50i32..50) {
        let sink: Sink<i32> = Sink::new();
        let g = move |x: i32| x.wrapping_mul(a);
        let h = move |x: i32| x.wrapping_add(b);

        let stepwise = sink.map(g).map(h);
        let fused = sink.map(move |x| h(g(x)));
        prop_assert!(!stepwise.occurred());
        prop_assert!(!fused.occurred());

        sink.resolve(value).unwrap();

        prop_assert_eq!(stepwise.value(), fused.value());
        prop_assert_eq!(stepwise.value(), Some(h(g(value))));
    }

    /// Property: map identity
    #[test]
    fn prop_map_identity(value in any::<i64>()) {
        let sink: Sink<i64> = Sink::new();
        let same = sink.map(|x| x);

        sink.resolve(value).unwrap();
        prop_assert_eq!(same.value(), sink.value());
    }

    /// Property: chain left identity
    ///
    /// `pure(x).chain(f)` occurs with the same value as `f(x)`.
    #[test]
    fn prop_chain_left_identity(value in any::<i32>()) {
        let f = |x: i32| pure(x.wrapping_sub(7));
        prop_assert_eq!(pure(value).chain(f).value(), f(value).value());
    }

    /// Property: chain right identity
    #[test]
    fn prop_chain_right_identity(value in any::<i32>()) {
        let sink: Sink<i32> = Sink::new();
        let chained = sink.chain(pure);

        sink.resolve(value).unwrap();
        prop_assert_eq!(chained.value(), Some(value));
    }

    /// Property: chain occurs only after both stages, in either order
    #[test]
    fn prop_chain_needs_both_stages(
        first in any::<i32>(),
        second in any::<i32>(),
        second_first in any::<bool>()
    ) {
        let outer: Sink<i32> = Sink::new();
        let inner: Sink<i32> = Sink::new();
        let handoff = inner.future();
        let chained = outer.chain(move |x| handoff.map(move |y| x.wrapping_add(y)));

        if second_first {
            inner.resolve(second).unwrap();
            prop_assert!(!chained.occurred());
            outer.resolve(first).unwrap();
        } else {
            outer.resolve(first).unwrap();
            prop_assert!(!chained.occurred());
            inner.resolve(second).unwrap();
        }

        prop_assert_eq!(chained.value(), Some(first.wrapping_add(second)));
    }

    /// Property: lift fires once, after the last parent, in parent order
    #[test]
    fn prop_lift_all_order_independent((values, order) in values_and_order()) {
        let sinks: Vec<Sink<i32>> = values.iter().map(|_| Sink::new()).collect();
        let parents: Vec<Future<i32>> = sinks.iter().map(Sink::future).collect();
        let fired = Arc::new(Mutex::new(Vec::new()));
        let fired_clone = fired.clone();

        let joined = lift_all(&parents, |vs| vs);
        joined.subscribe(move |vs| fired_clone.lock().unwrap().push(vs));

        for (step, &index) in order.iter().enumerate() {
            prop_assert!(fired.lock().unwrap().is_empty(), "fired before step {}", step);
            sinks[index].resolve(values[index]).unwrap();
        }

        prop_assert_eq!(fired.lock().unwrap().clone(), vec![values]);
    }

    /// Property: lift3 of a sum does not depend on firing order
    #[test]
    fn prop_lift3_sum_permutation(
        a in -1000i64..1000,
        b in -1000i64..1000,
        c in -1000i64..1000,
        order in order_of_three()
    ) {
        let sinks: Vec<Sink<i64>> = (0..3).map(|_| Sink::new()).collect();
        let sum = lift3(&sinks[0], &sinks[1], &sinks[2], |x, y, z| x + y + z);

        let values = [a, b, c];
        for index in order {
            sinks[index].resolve(values[index]).unwrap();
        }

        prop_assert_eq!(sum.value(), Some(a + b + c));
    }
}
