//! Static-handle FFI.

use std::ffi::c_void;

use crate::block::bridge;

/// Address of the process-wide static slot.
///
/// The same non-null pointer on every call; the host must not free it.
/// Returns null only if a panic was caught.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_lightuserdata() -> *const c_void {
    ffi_guard!(@or std::ptr::null(), {
        bridge().create_static_handle().as_ptr().cast::<c_void>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pointer_every_call() {
        let first = hb_lightuserdata();
        assert!(!first.is_null());
        for _ in 0..1000 {
            assert_eq!(hb_lightuserdata(), first);
        }
    }
}
