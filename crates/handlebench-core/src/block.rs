//! Sized blocks and the allocation capability that produces them.
//!
//! A host binding hands the bridge an implementation of [`HostAllocator`];
//! the bridge never reaches for a global allocator on its own. The block's
//! contents are never read or interpreted here.

use crate::error::HandleError;

/// Capability to allocate one opaque block on behalf of the host.
///
/// `Handle` is whatever the host needs back: an owned [`OpaqueBlock`] for
/// hosts that box it into their own object, or a table index for hosts that
/// only hold integers.
pub trait HostAllocator {
    /// The value returned to the host for each allocation.
    type Handle;

    /// Allocate a block of exactly `size` bytes.
    ///
    /// Each successful call must return a handle independent of every other
    /// live handle.
    fn allocate(&self, size: usize) -> Result<Self::Handle, HandleError>;
}

impl<A: HostAllocator + ?Sized> HostAllocator for &A {
    type Handle = A::Handle;

    fn allocate(&self, size: usize) -> Result<Self::Handle, HandleError> {
        (**self).allocate(size)
    }
}

/// A zero-initialised block of uninterpreted bytes.
///
/// Dropping the block releases it; when and whether that happens is up to
/// the host holding it.
pub struct OpaqueBlock {
    bytes: Box<[u8]>,
}

impl OpaqueBlock {
    /// Size of the block in bytes, as requested.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the block has zero length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Start address of the block.
    ///
    /// Distinct for distinct live non-empty blocks. Zero-length blocks share
    /// a dangling address and must be told apart by the host's own identity.
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }
}

impl std::fmt::Debug for OpaqueBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpaqueBlock")
            .field("len", &self.len())
            .field("addr", &self.as_ptr())
            .finish()
    }
}

/// Allocates blocks from the Rust global allocator.
///
/// Allocation failure is reported as [`HandleError::AllocationFailed`]
/// instead of aborting the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl HostAllocator for HeapAllocator {
    type Handle = OpaqueBlock;

    fn allocate(&self, size: usize) -> Result<OpaqueBlock, HandleError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| HandleError::AllocationFailed { requested: size })?;
        bytes.resize(size, 0u8);
        Ok(OpaqueBlock {
            bytes: bytes.into_boxed_slice(),
        })
    }
}
