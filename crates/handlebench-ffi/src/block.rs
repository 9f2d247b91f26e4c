//! Sized-handle FFI: allocate, query, release.
//!
//! The bridge and block table are process globals. `hb_userdata` takes the
//! table lock before asking the bridge for a block, so a poisoned or full
//! table fails without allocating or touching the bridge counters.

use std::sync::Mutex;

use handlebench_core::{Bridge, BridgeConfig, HeapAllocator, HostAllocator, OpaqueBlock};

use crate::status::HbStatus;
use crate::table::BlockTable;

static BRIDGE: Bridge<HeapAllocator> = Bridge::new(HeapAllocator, BridgeConfig::DEFAULT);

static BLOCKS: Mutex<BlockTable> = Mutex::new(BlockTable::new());

pub(crate) fn bridge() -> &'static Bridge<HeapAllocator> {
    &BRIDGE
}

pub(crate) fn blocks() -> &'static Mutex<BlockTable> {
    &BLOCKS
}

/// Allocate through `bridge` into `table`, returning the status and handle.
fn allocate_into<A>(table: &Mutex<BlockTable>, bridge: &Bridge<A>, size: i64) -> (i32, u64)
where
    A: HostAllocator<Handle = OpaqueBlock>,
{
    let mut blocks = match table.lock() {
        Ok(guard) => guard,
        Err(_) => return (HbStatus::InternalError as i32, 0),
    };
    if !blocks.has_room() {
        return (HbStatus::TableFull as i32, 0);
    }
    let block = match bridge.create_sized_handle(size) {
        Ok(b) => b,
        Err(e) => return (HbStatus::from(&e) as i32, 0),
    };
    match blocks.insert(block) {
        Some(handle) => (HbStatus::Ok as i32, handle),
        None => (HbStatus::TableFull as i32, 0),
    }
}

fn live_count(table: &Mutex<BlockTable>) -> Result<u64, HbStatus> {
    table
        .lock()
        .map(|t| t.live() as u64)
        .map_err(|_| HbStatus::InternalError)
}

/// Allocate a zeroed block of `size` bytes and write its handle.
///
/// Each successful call yields a handle distinct from every live handle.
/// The block stays alive until [`hb_userdata_release`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_userdata(size: i64, handle_out: *mut u64) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return HbStatus::InvalidArgument as i32;
        }
        let (status, handle) = allocate_into(&BLOCKS, &BRIDGE, size);
        if status == HbStatus::Ok as i32 {
            // SAFETY: handle_out is non-null and valid per caller contract.
            unsafe { *handle_out = handle };
        }
        status
    })
}

/// Write the size in bytes of the block behind `handle`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_userdata_len(handle: u64, len_out: *mut usize) -> i32 {
    ffi_guard!({
        if len_out.is_null() {
            return HbStatus::InvalidArgument as i32;
        }
        let len = match ffi_lock!(BLOCKS).get(handle) {
            Some(block) => block.len(),
            None => return HbStatus::InvalidHandle as i32,
        };
        // SAFETY: len_out is non-null and valid per caller contract.
        unsafe { *len_out = len };
        HbStatus::Ok as i32
    })
}

/// Release the block behind `handle`.
///
/// Releasing twice returns `InvalidHandle`; it never frees twice.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_userdata_release(handle: u64) -> i32 {
    ffi_guard!({
        // Drop the block after the table lock is released.
        let released = ffi_lock!(BLOCKS).remove(handle);
        match released {
            Some(_) => HbStatus::Ok as i32,
            None => HbStatus::InvalidHandle as i32,
        }
    })
}

/// Write the number of blocks allocated and not yet released.
///
/// Returns `InternalError` without writing if the table is poisoned.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn hb_userdata_live_count(count_out: *mut u64) -> i32 {
    ffi_guard!({
        if count_out.is_null() {
            return HbStatus::InvalidArgument as i32;
        }
        match live_count(&BLOCKS) {
            Ok(count) => {
                // SAFETY: count_out is non-null and valid per caller contract.
                unsafe { *count_out = count };
                HbStatus::Ok as i32
            }
            Err(status) => status as i32,
        }
    })
}
