//! C-compatible status codes.
//!
//! [`HbStatus`] is a `repr(i32)` enum returned by every status-returning
//! entry point. `Ok` = 0, all errors are negative. Values are ABI-stable.

use handlebench_core::HandleError;

/// Status code returned by FFI functions.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HbStatus {
    /// Success.
    Ok = 0,
    /// Block handle is invalid or was already released.
    InvalidHandle = -1,
    /// A pointer argument is null or an index is out of range.
    InvalidArgument = -2,
    /// Requested size is negative or above the configured maximum.
    SizeOutOfRange = -3,
    /// The allocator could not provide the block.
    AllocationFailed = -4,
    /// The block table has no free entry and cannot grow further.
    TableFull = -5,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&HandleError> for HbStatus {
    fn from(e: &HandleError) -> Self {
        if e.is_size_error() {
            HbStatus::SizeOutOfRange
        } else {
            HbStatus::AllocationFailed
        }
    }
}
