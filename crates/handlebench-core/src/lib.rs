//! Allocator bridge for object-creation microbenchmarks.
//!
//! Hands a host runtime one of two kinds of opaque handle:
//!
//! - a **sized handle**: a fresh, zeroed block of caller-chosen length whose
//!   lifetime belongs to the host ([`Bridge::create_sized_handle`]);
//! - a **static handle**: a non-owning reference to one process-wide slot,
//!   identical on every call ([`Bridge::create_static_handle`]).
//!
//! # Architecture
//!
//! ```text
//! host binding (C ABI / Python)
//! ├── walks REGISTRY at load time, binds "userdata" / "lightuserdata"
//! └── owns a Bridge<A>
//!     ├── A: HostAllocator (injected allocation capability)
//!     ├── BridgeConfig (size ceiling)
//!     └── BridgeStats (relaxed counters)
//! static_slot: OnceLock-guarded process-lifetime slot
//! ```
//!
//! Argument presence and type checking belong to the host binding. The
//! bridge only sees an already-extracted `i64`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod block;
pub mod bridge;
pub mod config;
pub mod error;
pub mod registry;
pub mod static_slot;

// Public re-exports for the primary API surface.
pub use block::{HeapAllocator, HostAllocator, OpaqueBlock};
pub use bridge::{Bridge, BridgeStats};
pub use config::BridgeConfig;
pub use error::HandleError;
pub use registry::{lookup, Operation, RegistryEntry, REGISTRY};
pub use static_slot::{static_handle, StaticHandle, StaticSlot};
