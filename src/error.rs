//! Error type shared by every driver operation.

use thiserror::Error;

use crate::host::Handle;

/// Failures surfaced by the path driver.
///
/// `NotFound` and `InvalidArgument` are recoverable: the driver is left
/// unchanged. `IndexOutOfRange` signals a broken internal invariant while
/// decoding a path and is never clamped away.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// No path state is registered for the actor.
    #[error("no path state registered for actor {0}")]
    NotFound(Handle),
    /// A parameter record or stat key was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A path point was requested past the end of the path.
    #[error("path point {index} out of range for a path of {len} points")]
    IndexOutOfRange {
        /// Requested point index.
        index: usize,
        /// Number of points in the path.
        len: usize,
    },
}

impl PathError {
    /// Convenience constructor for [`PathError::InvalidArgument`].
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }
}

impl From<serde_json::Error> for PathError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
