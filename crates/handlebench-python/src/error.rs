//! HandleError -> Python exception mapping with recovery hints.

use handlebench_core::HandleError;
use pyo3::exceptions::{PyMemoryError, PyOverflowError, PyValueError};
use pyo3::PyErr;

/// Convert a bridge error into a typed Python exception.
pub(crate) fn to_pyerr(e: &HandleError) -> PyErr {
    let full = format!("handlebench: {e}\n  Hint: {}", hint(e));
    match e {
        // Caller's fault, fixable by passing a valid size → ValueError
        HandleError::NegativeSize { .. } => PyValueError::new_err(full),

        // Does not fit the configured ceiling → OverflowError
        HandleError::SizeTooLarge { .. } => PyOverflowError::new_err(full),

        // Allocation failure → MemoryError
        HandleError::AllocationFailed { .. } => PyMemoryError::new_err(full),
    }
}

fn hint(e: &HandleError) -> &'static str {
    match e {
        HandleError::NegativeSize { .. } => {
            "userdata() takes a byte count; pass 0 for an empty block."
        }
        HandleError::SizeTooLarge { .. } => {
            "The size exceeds what a single allocation can hold. \
             Benchmark with smaller blocks."
        }
        HandleError::AllocationFailed { .. } => {
            "The process ran out of memory. Drop references to earlier \
             userdata objects so they can be collected, or use smaller sizes."
        }
    }
}
