//! The process-wide static slot behind every static handle.
//!
//! The slot lives in a `static` `OnceLock`, initialised on first use and
//! never released. Concurrent first calls race on the `OnceLock`; exactly
//! one initialiser runs and every caller observes the same slot.

use std::ptr;
use std::sync::OnceLock;

/// Storage behind the static handle.
///
/// Carries no payload; only its address matters.
#[derive(Debug)]
pub struct StaticSlot {
    _word: u64,
}

static SLOT: OnceLock<StaticSlot> = OnceLock::new();

/// Non-owning handle to the process-wide [`StaticSlot`].
///
/// Two handles compare equal iff they refer to the same slot, which in a
/// single process is always.
#[derive(Clone, Copy, Debug)]
pub struct StaticHandle {
    slot: &'static StaticSlot,
}

impl StaticHandle {
    /// Address of the slot, for hosts that carry raw pointers.
    pub fn as_ptr(self) -> *const StaticSlot {
        self.slot
    }
}

impl PartialEq for StaticHandle {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.slot, other.slot)
    }
}

impl Eq for StaticHandle {}

impl std::hash::Hash for StaticHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        ptr::hash(self.slot, state);
    }
}

/// Return the handle to the static slot, initialising it on first call.
pub fn static_handle() -> StaticHandle {
    let slot = SLOT.get_or_init(|| {
        tracing::debug!("static handle slot initialised");
        StaticSlot { _word: 0 }
    });
    StaticHandle { slot }
}
