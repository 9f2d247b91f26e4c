//! Bridge counters exposed to C.

use crate::block::{blocks, bridge};
use crate::status::HbStatus;

/// Counters for the process-wide bridge.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HbStats {
    /// Sized handles created since load.
    pub sized_handles: u64,
    /// Bytes across all sized handles created since load.
    pub bytes_allocated: u64,
    /// Static handles served since load.
    pub static_handles: u64,
    /// Sized-handle requests rejected.
    pub rejected: u64,
    /// Sized handles not yet released.
    pub live_blocks: u64,
}

/// Write the current counters to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_stats_get(out: *mut HbStats) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return HbStatus::InvalidArgument as i32;
        }
        let live_blocks = ffi_lock!(blocks()).live() as u64;
        let s = bridge().stats();
        let stats = HbStats {
            sized_handles: s.sized_handles,
            bytes_allocated: s.bytes_allocated,
            static_handles: s.static_handles,
            rejected: s.rejected,
            live_blocks,
        };
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = stats };
        HbStatus::Ok as i32
    })
}
