//! C ABI for the handlebench allocator bridge.
//!
//! A C host calls [`hb_open`] once at load time to receive the
//! `{userdata, lightuserdata}` function table, then calls through it.
//! Sized blocks live in a generation-checked handle table until the host
//! releases them with [`hb_userdata_release`]; the static handle is the raw
//! address of the process-wide slot.
//!
//! Every entry point runs inside `ffi_guard!`, so a Rust panic surfaces as
//! `HB_STATUS_PANICKED` with its message retrievable via
//! [`hb_last_panic_message`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::cell::RefCell;
use std::ffi::c_char;

/// Run an FFI body, converting a panic into a fallback return value.
///
/// The one-argument form returns `HbStatus::Panicked`; `@or` supplies a
/// fallback for entry points that do not return a status.
macro_rules! ffi_guard {
    (@or $fallback:expr, $body:block) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $fallback
            }
        }
    }};
    ($body:block) => {
        ffi_guard!(@or $crate::status::HbStatus::Panicked as i32, $body)
    };
}

/// Lock a global mutex or return `InternalError` if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::HbStatus::InternalError as i32,
        }
    };
}

mod block;
mod light;
mod registry;
mod stats;
mod status;
mod table;

pub use block::{hb_userdata, hb_userdata_len, hb_userdata_live_count, hb_userdata_release};
pub use light::hb_lightuserdata;
pub use registry::{
    hb_open, hb_registry_len, hb_registry_name, HbLightUserdataFn, HbModule, HbUserdataFn,
};
pub use stats::{hb_stats_get, HbStats};
pub use status::HbStatus;

thread_local! {
    static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn std::any::Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    };
    tracing::warn!(message = %msg, "panic caught at FFI boundary");
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Copy `src` into a caller buffer as a NUL-terminated string.
///
/// Writes at most `cap - 1` bytes plus the terminator; a null `buf` or zero
/// `cap` writes nothing. Returns the full length of `src`.
#[allow(unsafe_code)]
pub(crate) fn copy_to_c_buf(src: &[u8], buf: *mut c_char, cap: usize) -> i32 {
    if !buf.is_null() && cap > 0 {
        let n = src.len().min(cap - 1);
        // SAFETY: buf is valid for cap bytes per caller contract; n < cap.
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), buf.cast::<u8>(), n);
            *buf.add(n) = 0;
        }
    }
    i32::try_from(src.len()).unwrap_or(i32::MAX)
}

/// Copy the calling thread's last caught panic message into `buf`.
///
/// Returns the message length in bytes (0 if no panic was recorded). Pass a
/// null `buf` to query the length.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_last_panic_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_PANIC.with(|cell| copy_to_c_buf(cell.borrow().as_bytes(), buf, cap))
}
