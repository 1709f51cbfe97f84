//! Domain error types.
//!
//! These errors represent violations of the catalogue's build rules.
//! They are distinct from input format and I/O errors.

use super::StopIndex;

/// Errors raised while populating the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// A stop with this name already exists
    #[error("duplicate stop: {0}")]
    DuplicateStop(String),

    /// A bus with this name already exists
    #[error("duplicate bus: {0}")]
    DuplicateBus(String),

    /// A stop name that was never added
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// A stop index past the end of the stop table
    #[error("stop index {0} is out of range")]
    StopIndexOutOfRange(StopIndex),

    /// A bus route with no stops
    #[error("bus {0} has no stops")]
    EmptyRoute(String),
}
