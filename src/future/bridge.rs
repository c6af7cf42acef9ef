// Copyright (c) 2025 - Cowboy AI, Inc.
//! Async Bridge - between `std::future::Future` and push futures
//!
//! Inbound, an async computation becomes a pending [`Future`] plus a driver
//! that resolves it on completion. Outbound, any [`Future`] can be awaited.
//!
//! ```text
//! async source ──driver──> resolve ──push──> derived futures
//! Future<A> ──subscribe──> oneshot ──await──> FutureResult<A>
//! ```
//!
//! Propagation triggered by a driver runs on whichever task polls the
//! driver; every consumer downstream runs there, synchronously.

use super::occurrence::Future;
use super::FutureKind;
use crate::errors::{FutureError, FutureResult};
use futures::channel::oneshot;
use futures::FutureExt;
use std::sync::{Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::debug;

impl<A: Clone + Send + Sync + 'static> Future<A> {
    /// Adapt an async computation
    ///
    /// Returns the pending future and a driver. Polling the driver to
    /// completion runs `source` and resolves the future with its output.
    /// If the driver is never polled or `source` never completes, the
    /// future never occurs.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let (reply, driver) = Future::from_async(async { fetch().await });
    /// let upper = reply.map(|body: String| body.to_uppercase());
    /// driver.await?;
    /// ```
    pub fn from_async<S>(
        source: S,
    ) -> (Self, impl std::future::Future<Output = FutureResult<()>> + Send)
    where
        S: std::future::Future<Output = A> + Send + 'static,
    {
        let future = Future::pending(FutureKind::Async);
        let target = future.clone();
        let driver = source.map(move |value| {
            debug!("async source completed");
            target.resolve(value)
        });
        (future, driver)
    }

    /// Adapt an async computation, driving it on the current tokio runtime
    ///
    /// # Panics
    ///
    /// When called outside a tokio runtime.
    pub fn spawn<S>(source: S) -> (Self, JoinHandle<FutureResult<()>>)
    where
        S: std::future::Future<Output = A> + Send + 'static,
    {
        let (future, driver) = Self::from_async(source);
        (future, tokio::spawn(driver))
    }

    /// Await the occurrence
    ///
    /// Resolves to [`FutureError::Abandoned`] if the future is dropped
    /// while still pending.
    pub fn to_async(&self) -> impl std::future::Future<Output = FutureResult<A>> + Send {
        let (sender, receiver) = oneshot::channel();
        let sender = Mutex::new(Some(sender));
        self.subscribe(move |value| {
            let sender = sender.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(sender) = sender {
                if sender.send(value).is_err() {
                    debug!("awaiting side went away before occurrence");
                }
            }
        });
        receiver.map(|received| received.map_err(|_| FutureError::Abandoned))
    }
}
