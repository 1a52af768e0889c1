use std::alloc::{Layout, handle_alloc_error};
use std::result;

use thiserror::Error;

/// Errors that can occur when a [`PlacementVec`][crate::PlacementVec] or
/// [`RawBuffer`][crate::RawBuffer] needs to acquire storage.
///
/// Any operation that returns one of these leaves the collection in the state it had before the
/// call.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The requested number of items cannot be described as a single allocation, either because
    /// the size in bytes overflows `isize::MAX` or because the next capacity chosen by the growth
    /// policy is not representable.
    #[error("capacity of {requested} items overflows the addressable memory range")]
    CapacityOverflow {
        /// The number of items that was requested.
        requested: usize,
    },

    /// The memory source could not satisfy the request.
    #[error(
        "failed to allocate {} bytes with alignment {}",
        .layout.size(),
        .layout.align()
    )]
    AllocationFailed {
        /// The layout of the block that could not be allocated.
        layout: Layout,
    },
}

impl Error {
    /// Escalates the error into the process-level response the standard collections use for
    /// infallible APIs such as [`Clone::clone`].
    #[cfg_attr(test, mutants::skip)] // Diverges, there is nothing to observe.
    pub(crate) fn escalate(self) -> ! {
        match self {
            Self::CapacityOverflow { requested } => {
                panic!("capacity overflow: cannot hold {requested} items")
            }
            Self::AllocationFailed { layout } => handle_alloc_error(layout),
        }
    }
}

/// A specialized `Result` type for storage operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = result::Result<T, Error>;
