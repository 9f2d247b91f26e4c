//! The allocator bridge: size policy, allocation, and counters.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::block::HostAllocator;
use crate::config::BridgeConfig;
use crate::error::HandleError;
use crate::static_slot::{static_handle, StaticHandle};

/// Point-in-time copy of a bridge's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Sized handles successfully created.
    pub sized_handles: u64,
    /// Total bytes across all successfully created sized handles.
    pub bytes_allocated: u64,
    /// Static handles served.
    pub static_handles: u64,
    /// Sized-handle requests rejected by size policy or the allocator.
    pub rejected: u64,
}

struct Counters {
    sized_handles: AtomicU64,
    bytes_allocated: AtomicU64,
    static_handles: AtomicU64,
    rejected: AtomicU64,
}

impl Counters {
    const fn new() -> Self {
        Self {
            sized_handles: AtomicU64::new(0),
            bytes_allocated: AtomicU64::new(0),
            static_handles: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }
}

/// Hands out sized and static handles on behalf of one host binding.
///
/// The allocator is supplied by the binding. Counters use relaxed atomics,
/// so a `Bridge` can sit in a `static` and be shared across threads when
/// `A` allows it.
pub struct Bridge<A> {
    allocator: A,
    config: BridgeConfig,
    counters: Counters,
}

impl<A> Bridge<A> {
    /// Create a bridge around `allocator`.
    pub const fn new(allocator: A, config: BridgeConfig) -> Self {
        Self {
            allocator,
            config,
            counters: Counters::new(),
        }
    }

    /// Return the handle to the process-wide static slot.
    ///
    /// Never allocates after the first call in the process.
    pub fn create_static_handle(&self) -> StaticHandle {
        self.counters.static_handles.fetch_add(1, Ordering::Relaxed);
        static_handle()
    }

    /// Snapshot the counters.
    pub fn stats(&self) -> BridgeStats {
        BridgeStats {
            sized_handles: self.counters.sized_handles.load(Ordering::Relaxed),
            bytes_allocated: self.counters.bytes_allocated.load(Ordering::Relaxed),
            static_handles: self.counters.static_handles.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
        }
    }

    fn reject(&self, err: HandleError) -> HandleError {
        self.counters.rejected.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(error = %err, "sized handle request rejected");
        err
    }
}

impl<A: HostAllocator> Bridge<A> {
    /// Allocate a fresh block of `size` bytes and return the host's handle.
    ///
    /// Negative sizes and sizes above `max_block_size` fail before the
    /// allocator is called.
    pub fn create_sized_handle(&self, size: i64) -> Result<A::Handle, HandleError> {
        let len = checked_size(size, self.config.max_block_size).map_err(|e| self.reject(e))?;
        let handle = self.allocator.allocate(len).map_err(|e| self.reject(e))?;
        self.counters.sized_handles.fetch_add(1, Ordering::Relaxed);
        self.counters
            .bytes_allocated
            .fetch_add(len as u64, Ordering::Relaxed);
        tracing::trace!(size = len, "sized handle created");
        Ok(handle)
    }
}

impl<A: Default> Default for Bridge<A> {
    fn default() -> Self {
        Self::new(A::default(), BridgeConfig::default())
    }
}

/// Convert a host integer into a block length under `max`.
pub fn checked_size(size: i64, max: usize) -> Result<usize, HandleError> {
    if size < 0 {
        return Err(HandleError::NegativeSize { requested: size });
    }
    match usize::try_from(size) {
        Ok(len) if len <= max => Ok(len),
        _ => Err(HandleError::SizeTooLarge {
            requested: size,
            max,
        }),
    }
}
