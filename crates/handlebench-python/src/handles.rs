//! Userdata / LightUserdata: the two handle kinds as Python objects.

use handlebench_core::{Bridge, BridgeConfig, HeapAllocator, OpaqueBlock, StaticHandle};
use pyo3::prelude::*;
use pyo3::sync::PyOnceLock;

use crate::error::to_pyerr;

static BRIDGE: Bridge<HeapAllocator> = Bridge::new(HeapAllocator, BridgeConfig::DEFAULT);

static LIGHT: PyOnceLock<Py<LightUserdata>> = PyOnceLock::new();

pub(crate) fn bridge() -> &'static Bridge<HeapAllocator> {
    &BRIDGE
}

/// An opaque block of bytes owned by the Python object that wraps it.
///
/// Freed when the object is collected.
#[pyclass(frozen, module = "_handlebench")]
pub(crate) struct Userdata {
    block: OpaqueBlock,
}

#[pymethods]
impl Userdata {
    fn __len__(&self) -> usize {
        self.block.len()
    }

    fn __repr__(&self) -> String {
        format!("Userdata(len={})", self.block.len())
    }
}

/// Non-owning handle to the process-wide static slot.
///
/// Only one instance exists; `lightuserdata()` always returns it.
#[pyclass(frozen, module = "_handlebench")]
pub(crate) struct LightUserdata {
    handle: StaticHandle,
}

#[pymethods]
impl LightUserdata {
    /// Address of the static slot.
    #[getter]
    fn address(&self) -> usize {
        self.handle.as_ptr() as usize
    }

    fn __repr__(&self) -> String {
        format!("LightUserdata({:#x})", self.address())
    }
}

/// Allocate a fresh zeroed block of `size` bytes.
///
/// Raises `TypeError` for a missing or non-integer argument, `ValueError`
/// for a negative size, `OverflowError` for an int outside the 64-bit range
/// or above the block ceiling, and `MemoryError` when the allocation fails.
#[pyfunction]
pub(crate) fn userdata(size: i64) -> PyResult<Userdata> {
    BRIDGE
        .create_sized_handle(size)
        .map(|block| Userdata { block })
        .map_err(|e| to_pyerr(&e))
}

/// Return the single static handle object.
#[pyfunction]
pub(crate) fn lightuserdata(py: Python<'_>) -> PyResult<Py<LightUserdata>> {
    let handle = BRIDGE.create_static_handle();
    let light = LIGHT.get_or_try_init(py, || Py::new(py, LightUserdata { handle }))?;
    Ok(light.clone_ref(py))
}
