//! Mock [`HostAllocator`] implementations for exercising the bridge.
//!
//! - [`CountingAllocator`]: delegates to the heap, counts calls and bytes.
//! - [`FailingAllocator`]: refuses every request.
//! - [`SerialAllocator`]: hands back integer handles, like a host that only
//!   stores indices.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicU64, Ordering};

use handlebench_core::{HandleError, HeapAllocator, HostAllocator, OpaqueBlock};

/// Heap allocator that records every call it sees.
#[derive(Default)]
pub struct CountingAllocator {
    calls: AtomicU64,
    bytes: AtomicU64,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `allocate` calls that reached this allocator.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Sum of sizes passed to `allocate`.
    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

impl HostAllocator for CountingAllocator {
    type Handle = OpaqueBlock;

    fn allocate(&self, size: usize) -> Result<OpaqueBlock, HandleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(size as u64, Ordering::Relaxed);
        HeapAllocator.allocate(size)
    }
}

/// Allocator that always reports exhaustion.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingAllocator;

impl HostAllocator for FailingAllocator {
    type Handle = OpaqueBlock;

    fn allocate(&self, size: usize) -> Result<OpaqueBlock, HandleError> {
        Err(HandleError::AllocationFailed { requested: size })
    }
}

/// Allocator returning `(serial, size)` pairs without touching memory.
///
/// Serials start at 1 and never repeat.
#[derive(Default)]
pub struct SerialAllocator {
    next: AtomicU64,
}

impl SerialAllocator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HostAllocator for SerialAllocator {
    type Handle = (u64, usize);

    fn allocate(&self, size: usize) -> Result<(u64, usize), HandleError> {
        let serial = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Ok((serial, size))
    }
}
