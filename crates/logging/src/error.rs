//! crates/logging/src/error.rs
//! Failures reported by emission calls.

use logging_sink::SinkError;

use crate::levels::Level;
use crate::native::UnknownPriority;

/// Error returned by a logging call that did not complete.
///
/// Suppressed calls never produce an error; they return `Ok(0)`.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A raw priority passed to [`Dispatcher::println`](crate::Dispatcher::println)
    /// is not one of the host's native priorities. Nothing was written.
    #[error(transparent)]
    UnrecognizedPriority(#[from] UnknownPriority),

    /// An accepted call supplied neither a message nor an error to describe.
    #[error("{level} log call carried neither a message nor an error")]
    MissingMessage {
        /// Tier of the rejected call.
        level: Level,
    },

    /// The sink failed; the error is passed through unchanged.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl EmitError {
    /// Reports whether the call was refused because of an unknown raw priority.
    #[must_use]
    pub const fn is_unrecognized_priority(&self) -> bool {
        matches!(self, Self::UnrecognizedPriority(_))
    }
}
