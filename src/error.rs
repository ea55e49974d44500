use crate::ring::arena::Handle;
use thiserror::Error;

/// Errors returned by the fallible operations of a [`Ring`](crate::Ring).
///
/// None of the operations that return a `RingError` mutate the ring before
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// The index does not satisfy the bounds of the operation.
    ///
    /// Insertion accepts `0..=size`, reading and removal accept `0..size`.
    #[error("index {index} is out of range for a ring of size {size}")]
    OutOfRange { index: usize, size: usize },

    #[error("ring is empty")]
    Empty,

    /// The handle names a node that has been removed from the ring.
    #[error("{0} does not refer to a live node")]
    StaleHandle(Handle),
}

pub type Result<T, E = RingError> = std::result::Result<T, E>;
