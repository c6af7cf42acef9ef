// Copyright (c) 2025 - Cowboy AI, Inc.
//! Future Propagation Example
//!
//! This example walks through building computations on values that do not
//! exist yet, and shows how a single `resolve` drives the whole graph.
//!
//! Run with `RUST_LOG=cim_future=trace` to watch every occurrence.
//!
//! # Example Flow
//!
//! ```text
//! order ──map──> total ──┐
//!                        ├──lift2──> invoice ──subscribe──> print
//! customer ──────────────┘
//! ```

use anyhow::Result;
use cim_future::{lift2, lift_all, Future, Observable, Observer, Sink};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A tiny push-based continuous value standing in for a real Behavior
struct Thermometer {
    observers: Mutex<Vec<Arc<dyn Observer<i32>>>>,
}

impl Thermometer {
    fn read(&self, celsius: i32) -> Result<()> {
        let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner()).clone();
        for observer in observers {
            observer.push(celsius)?;
        }
        Ok(())
    }
}

impl Observable<i32> for Thermometer {
    fn add_listener(&self, observer: Arc<dyn Observer<i32>>) {
        self.observers.lock().unwrap_or_else(|e| e.into_inner()).push(observer);
    }

    fn remove_listener(&self, observer: &Arc<dyn Observer<i32>>) {
        self.observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|o| !Arc::ptr_eq(o, observer));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Future Propagation Example ===\n");

    // === Example 1: Sink and Map ===
    println!("=== Example 1: Sink and Map ===");

    let answer: Sink<i32> = Sink::new();
    answer.map(|x| x * 2).subscribe(|x| println!("doubled: {}", x));
    println!("resolving with 21...");
    answer.resolve(21)?;
    println!();

    // === Example 2: Joining Futures ===
    println!("=== Example 2: Lift ===");

    let order: Sink<Vec<u32>> = Sink::new();
    let customer: Sink<String> = Sink::new();
    let total = order.map(|lines| lines.iter().sum::<u32>());
    let invoice = lift2(&customer, &total, |name, cents| {
        format!("{} owes ${}.{:02}", name, cents / 100, cents % 100)
    });
    invoice.subscribe(|text| println!("invoice: {}", text));

    customer.resolve("Ada".to_string())?;
    println!("customer known, invoice occurred: {}", invoice.occurred());
    order.resolve(vec![1250, 399, 1000])?;
    println!();

    // === Example 3: Chain ===
    println!("=== Example 3: Chain ===");

    let approval: Sink<bool> = Sink::new();
    let shipping = Future::pure("shipped");
    let held = Future::pure("held for review");
    let outcome = approval.chain(move |ok| if ok { shipping.clone() } else { held.clone() });
    approval.resolve(true)?;
    println!("outcome: {:?}\n", outcome.value());

    // === Example 4: N-ary Lift ===
    println!("=== Example 4: Waiting for Every Worker ===");

    let workers: Vec<Sink<u64>> = (0..4).map(|_| Sink::new()).collect();
    let results: Vec<Future<u64>> = workers.iter().map(Sink::future).collect();
    let all_done = lift_all(&results, |counts| counts.iter().sum::<u64>());
    for (index, worker) in workers.iter().enumerate().rev() {
        worker.resolve(index as u64 * 10)?;
        println!("worker {} done, all done: {}", index, all_done.occurred());
    }
    println!("total work: {:?}\n", all_done.value());

    // === Example 5: Behavior Bridge ===
    println!("=== Example 5: Next Value of a Behavior ===");

    let thermometer = Arc::new(Thermometer {
        observers: Mutex::new(Vec::new()),
    });
    let next_reading = Future::from_behavior(&thermometer);
    thermometer.read(21)?;
    thermometer.read(23)?;
    println!("next reading: {:?}\n", next_reading.value());

    // === Example 6: Async Bridge ===
    println!("=== Example 6: Async Bridge ===");

    let (greeting, handle) = Future::spawn(async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        "hello from a task".to_string()
    });
    let shouted = greeting.map(|text| text.to_uppercase());
    handle.await??;
    println!("shouted: {}", shouted.to_async().await?);

    println!("\n=== Example Complete ===");
    Ok(())
}
