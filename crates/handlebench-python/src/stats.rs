//! `stats()`: bridge counters as a plain dict.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::handles::bridge;

/// Counters for this module's bridge since import.
///
/// Keys: `sized_handles`, `bytes_allocated`, `static_handles`, `rejected`.
#[pyfunction]
pub(crate) fn stats(py: Python<'_>) -> PyResult<Bound<'_, PyDict>> {
    let s = bridge().stats();
    let d = PyDict::new(py);
    d.set_item("sized_handles", s.sized_handles)?;
    d.set_item("bytes_allocated", s.bytes_allocated)?;
    d.set_item("static_handles", s.static_handles)?;
    d.set_item("rejected", s.rejected)?;
    Ok(d)
}
