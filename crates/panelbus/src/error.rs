//! Bus-related error types.

use thiserror::Error;

/// Errors that can occur on the event bus.
#[derive(Debug, Error)]
pub enum BusError {
    /// An event-kind tag could not be resolved to a declared kind.
    ///
    /// Raised at subscription construction time; the subscription is never
    /// produced and cannot be registered.
    #[error("unknown event kind: {name}")]
    UnknownKind {
        /// The tag that was not found among declared kinds.
        name: String,
    },

    /// The subscription registry could not be obtained.
    ///
    /// Happens only when the registry lock is poisoned, which is unreachable
    /// in normal operation. Fatal to the calling operation.
    #[error("event dispatcher unavailable: {0}")]
    Internal(&'static str),
}

/// Result type for bus operations.
pub type BusResult<T> = Result<T, BusError>;
