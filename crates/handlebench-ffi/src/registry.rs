//! Load-time registration for C hosts.

use std::ffi::{c_char, c_void};

use handlebench_core::{Operation, REGISTRY};

use crate::status::HbStatus;
use crate::{copy_to_c_buf, hb_lightuserdata, hb_userdata};

/// Signature of the sized-handle entry point.
pub type HbUserdataFn = extern "C" fn(size: i64, handle_out: *mut u64) -> i32;

/// Signature of the static-handle entry point.
pub type HbLightUserdataFn = extern "C" fn() -> *const c_void;

/// Function table handed to the host by [`hb_open`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct HbModule {
    /// Bound to the `"userdata"` registry entry.
    pub userdata: Option<HbUserdataFn>,
    /// Bound to the `"lightuserdata"` registry entry.
    pub lightuserdata: Option<HbLightUserdataFn>,
}

/// Fill `module_out` with the module's entry points.
///
/// Intended to be called once per load; repeated calls are harmless.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_open(module_out: *mut HbModule) -> i32 {
    ffi_guard!({
        if module_out.is_null() {
            return HbStatus::InvalidArgument as i32;
        }
        let mut module = HbModule::default();
        for entry in &REGISTRY {
            match entry.op {
                Operation::SizedHandle => module.userdata = Some(hb_userdata),
                Operation::StaticHandle => module.lightuserdata = Some(hb_lightuserdata),
            }
        }
        tracing::debug!(entries = REGISTRY.len(), "C module opened");
        // SAFETY: module_out is non-null and valid per caller contract.
        unsafe { *module_out = module };
        HbStatus::Ok as i32
    })
}

/// Number of registered operations.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_registry_len() -> usize {
    REGISTRY.len()
}

/// Copy the name of registry entry `index` into `buf` (NUL-terminated).
///
/// Returns the name length, or `InvalidArgument` if `index` is out of range.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_registry_name(index: usize, buf: *mut c_char, cap: usize) -> i32 {
    ffi_guard!({
        match REGISTRY.get(index) {
            Some(entry) => copy_to_c_buf(entry.name.as_bytes(), buf, cap),
            None => HbStatus::InvalidArgument as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_binds_every_entry() {
        let mut module = HbModule::default();
        assert_eq!(hb_open(&mut module), HbStatus::Ok as i32);
        assert!(module.userdata.is_some());
        assert!(module.lightuserdata.is_some());
    }

    #[test]
    fn open_rejects_null() {
        assert_eq!(
            hb_open(std::ptr::null_mut()),
            HbStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn names_round_trip_through_c_buffer() {
        assert_eq!(hb_registry_len(), 2);
        let mut buf = [0u8; 32];
        let len = hb_registry_name(1, buf.as_mut_ptr().cast(), buf.len());
        assert_eq!(&buf[..len as usize], b"lightuserdata");
        assert_eq!(buf[len as usize], 0);
        assert_eq!(
            hb_registry_name(2, buf.as_mut_ptr().cast(), buf.len()),
            HbStatus::InvalidArgument as i32
        );
    }
}
