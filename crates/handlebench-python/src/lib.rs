//! Python bindings for the handlebench allocator bridge.
//!
//! The native extension is named `_handlebench`. Module initialisation is
//! the registration call: it walks the core registry and binds each name
//! to its PyO3 function.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use handlebench_core::{Operation, REGISTRY};
use pyo3::prelude::*;

mod error;
mod handles;
mod stats;

/// The native `_handlebench` extension module.
#[pymodule]
fn _handlebench(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register(m)
}

/// Bind classes, registry entries and helpers onto `m`.
fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<handles::Userdata>()?;
    m.add_class::<handles::LightUserdata>()?;

    for entry in &REGISTRY {
        match entry.op {
            Operation::SizedHandle => {
                m.add(entry.name, wrap_pyfunction!(handles::userdata, m)?)?
            }
            Operation::StaticHandle => {
                m.add(entry.name, wrap_pyfunction!(handles::lightuserdata, m)?)?
            }
        }
    }

    m.add_function(wrap_pyfunction!(stats::stats, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    tracing::debug!(entries = REGISTRY.len(), "_handlebench module registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pyo3::exceptions::{PyOverflowError, PyTypeError, PyValueError};
    use pyo3::types::PyModule;

    use super::*;

    // Tests read the shared bridge counters; run them one at a time.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn with_module<F>(f: F)
    where
        F: for<'py> FnOnce(Python<'py>, &Bound<'py, PyModule>) -> PyResult<()>,
    {
        let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        Python::attach(|py| {
            let m = PyModule::new(py, "_handlebench")?;
            register(&m)?;
            f(py, &m)
        })
        .unwrap();
    }

    fn sized_handles(m: &Bound<'_, PyModule>) -> PyResult<u64> {
        m.getattr("stats")?
            .call0()?
            .get_item("sized_handles")?
            .extract()
    }

    #[test]
    fn bad_arguments_raise_type_error_without_allocating() {
        with_module(|py, m| {
            let userdata = m.getattr("userdata")?;
            let before = sized_handles(m)?;

            let missing = userdata.call0().unwrap_err();
            assert!(missing.is_instance_of::<PyTypeError>(py), "{missing}");

            let text = userdata.call1(("x",)).unwrap_err();
            assert!(text.is_instance_of::<PyTypeError>(py), "{text}");

            let float = userdata.call1((1.5f64,)).unwrap_err();
            assert!(float.is_instance_of::<PyTypeError>(py), "{float}");

            assert_eq!(sized_handles(m)?, before);
            Ok(())
        });
    }

    #[test]
    fn size_errors_raise_typed_exceptions() {
        with_module(|py, m| {
            let userdata = m.getattr("userdata")?;
            let before = sized_handles(m)?;

            let negative = userdata.call1((-1i64,)).unwrap_err();
            assert!(negative.is_instance_of::<PyValueError>(py), "{negative}");

            let huge = userdata.call1((1u128 << 70,)).unwrap_err();
            assert!(huge.is_instance_of::<PyOverflowError>(py), "{huge}");

            assert_eq!(sized_handles(m)?, before);
            Ok(())
        });
    }

    #[test]
    fn userdata_calls_return_distinct_objects() {
        with_module(|_py, m| {
            let userdata = m.getattr("userdata")?;
            let before = sized_handles(m)?;
            let a = userdata.call1((16i64,))?;
            let b = userdata.call1((16i64,))?;
            assert_ne!(a.as_ptr(), b.as_ptr());
            assert!(!a.eq(&b)?);
            assert_eq!(a.len()?, 16);
            assert_eq!(b.len()?, 16);
            assert_eq!(sized_handles(m)?, before + 2);
            Ok(())
        });
    }

    #[test]
    fn lightuserdata_is_one_object() {
        with_module(|_py, m| {
            let light = m.getattr("lightuserdata")?;
            let first = light.call0()?;
            for _ in 0..1000 {
                assert_eq!(light.call0()?.as_ptr(), first.as_ptr());
            }
            let address: usize = first.getattr("address")?.extract()?;
            assert_ne!(address, 0);
            Ok(())
        });
    }

    #[test]
    fn empty_userdata_is_not_lightuserdata() {
        with_module(|_py, m| {
            let empty = m.getattr("userdata")?.call1((0i64,))?;
            let light = m.getattr("lightuserdata")?.call0()?;
            assert_eq!(empty.len()?, 0);
            assert_ne!(empty.as_ptr(), light.as_ptr());
            assert!(!empty.eq(&light)?);
            Ok(())
        });
    }

    #[test]
    fn stats_exposes_every_counter() {
        with_module(|_py, m| {
            let stats = m.getattr("stats")?.call0()?;
            assert_eq!(stats.len()?, 4);
            for key in ["sized_handles", "bytes_allocated", "static_handles", "rejected"] {
                let _: u64 = stats.get_item(key)?.extract()?;
            }
            Ok(())
        });
    }

    #[test]
    fn registry_names_are_bound() {
        with_module(|_py, m| {
            for entry in &REGISTRY {
                assert!(m.getattr(entry.name)?.is_callable(), "{}", entry.name);
            }
            Ok(())
        });
    }
}
