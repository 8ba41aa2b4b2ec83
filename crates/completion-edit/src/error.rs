//! Batch-level errors.

use crate::buffer::{BufferError, BufferId};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors that abort an edit batch, or reject its configuration.
pub enum EditError {
    #[error("unknown position encoding '{0}'")]
    /// A range was tagged with an encoding the engine cannot map onto buffer bytes.
    UnknownEncoding(String),

    #[error("row window {lo}..{hi} is outside the buffer ({line_count} lines)")]
    /// The rows an edit batch touches are not in the buffer (it changed underneath the request).
    OutOfBounds {
        /// First row of the requested window (may be negative).
        lo: isize,
        /// Exclusive end row of the requested window.
        hi: isize,
        /// Line count recorded in the context.
        line_count: usize,
    },

    #[error("context was captured for buffer {expected}, current buffer is {actual}")]
    /// The completion targets a buffer that is no longer current.
    StaleBuffer {
        /// Buffer id from the context.
        expected: BufferId,
        /// Buffer id of the buffer handed to the engine.
        actual: BufferId,
    },

    #[error("no primary instruction resolved a cursor column")]
    /// Internal invariant violation: a consolidated batch must own exactly one primary.
    MissingPrimary,

    #[error(transparent)]
    /// Reading the buffer failed.
    Buffer(#[from] BufferError),
}
