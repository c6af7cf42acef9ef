//! Error types for future propagation
//!
//! Every variant except [`FutureError::Abandoned`] is a contract violation:
//! a programming error in how the propagation graph was wired or driven.
//! Failures inside user closures are not represented here; they unwind
//! through the propagation call chain untouched.

use crate::future::FutureKind;
use thiserror::Error;

/// Errors that can occur while resolving or propagating futures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FutureError {
    /// `resolve` was called on a future that has already occurred
    #[error("{kind} future has already occurred")]
    AlreadyOccurred {
        /// Variant of the future that rejected the value
        kind: FutureKind,
    },

    /// A value was pushed into a future that only produces values
    #[error("{kind} future cannot receive pushes")]
    UnexpectedPush {
        /// Variant of the future that received the push
        kind: FutureKind,
    },

    /// A notification kind the receiver does not support
    #[error("{kind} future does not support downward pushes")]
    UnsupportedSignal {
        /// Variant of the future that received the signal
        kind: FutureKind,
    },

    /// The awaited future was dropped before it occurred
    #[error("future was dropped before it occurred")]
    Abandoned,
}

/// Result type for future operations
pub type FutureResult<T> = Result<T, FutureError>;
