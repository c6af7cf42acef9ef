// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Occurrence and Delivery
//!
//! These tests check that a future occurs at most once, that every
//! listener registered before occurrence receives the value exactly once
//! in registration order, and that late listeners are served immediately.

use cim_future::{pure, FutureError, FutureKind, Sink};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Occurred futures serve late listeners synchronously
    #[test]
    fn prop_pure_delivers_to_late_listener(value in any::<i64>()) {
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();

        pure(value).subscribe(move |v| *seen_clone.lock().unwrap() = Some(v));

        prop_assert_eq!(*seen.lock().unwrap(), Some(value));
    }

    /// Property: Every early listener gets the value once, in order
    #[test]
    fn prop_delivery_in_registration_order(
        value in any::<i32>(),
        listeners in 0usize..32
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink: Sink<i32> = Sink::new();

        for index in 0..listeners {
            let log = log.clone();
            sink.subscribe(move |v| log.lock().unwrap().push((index, v)));
        }
        sink.resolve(value).unwrap();

        let expected: Vec<(usize, i32)> = (0..listeners).map(|i| (i, value)).collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }

    /// Property: A second resolve is rejected and changes nothing
    #[test]
    fn prop_second_resolve_rejected(first in any::<u16>(), second in any::<u16>()) {
        let count = Arc::new(Mutex::new(0usize));
        let count_clone = count.clone();
        let sink: Sink<u16> = Sink::new();
        sink.subscribe(move |_| *count_clone.lock().unwrap() += 1);

        sink.resolve(first).unwrap();
        let result = sink.resolve(second);

        prop_assert_eq!(result, Err(FutureError::AlreadyOccurred { kind: FutureKind::Sink }));
        prop_assert_eq!(sink.value(), Some(first));
        prop_assert_eq!(*count.lock().unwrap(), 1);
    }

    /// Property: Listeners registered before and after occurrence agree
    #[test]
    fn prop_early_and_late_listeners_agree(value in ".*") {
        let early = Arc::new(Mutex::new(None));
        let late = Arc::new(Mutex::new(None));
        let sink: Sink<String> = Sink::new();

        let early_clone = early.clone();
        sink.subscribe(move |v| *early_clone.lock().unwrap() = Some(v));
        sink.resolve(value.clone()).unwrap();
        let late_clone = late.clone();
        sink.subscribe(move |v| *late_clone.lock().unwrap() = Some(v));

        prop_assert_eq!(early.lock().unwrap().clone(), Some(value.clone()));
        prop_assert_eq!(late.lock().unwrap().clone(), Some(value));
    }
}
