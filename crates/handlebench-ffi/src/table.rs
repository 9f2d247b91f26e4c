//! Generation-checked table of live sized blocks.
//!
//! C hosts hold `u64` handles, never pointers into Rust memory. A handle
//! packs `index + 1` in the upper 32 bits and the entry's generation in
//! the lower 32, so `0` is never a valid handle. Releasing an entry bumps
//! its generation; stale handles then miss instead of aliasing a newer
//! block. Vacant entries form an intrusive free list.

use handlebench_core::OpaqueBlock;

fn pack(index: u32, generation: u32) -> u64 {
    ((u64::from(index) + 1) << 32) | u64::from(generation)
}

/// Entry count limit: `index + 1` must fit in the upper half of a handle.
const MAX_ENTRIES: u32 = u32::MAX;

/// Index for a new entry appended at `len`, if it stays below `max`.
fn next_index(len: usize, max: u32) -> Option<u32> {
    u32::try_from(len).ok().filter(|&index| index < max)
}

fn unpack(handle: u64) -> Option<(u32, u32)> {
    let index = ((handle >> 32) as u32).checked_sub(1)?;
    Some((index, handle as u32))
}

enum Entry {
    Live {
        generation: u32,
        block: OpaqueBlock,
    },
    Vacant {
        generation: u32,
        next_free: Option<u32>,
    },
}

/// Owns every block a C host has not yet released.
pub(crate) struct BlockTable {
    entries: Vec<Entry>,
    free_head: Option<u32>,
    live: usize,
    max_entries: u32,
}

impl BlockTable {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            live: 0,
            max_entries: MAX_ENTRIES,
        }
    }

    /// Whether [`insert`](Self::insert) would succeed.
    pub(crate) fn has_room(&self) -> bool {
        self.free_head.is_some() || next_index(self.entries.len(), self.max_entries).is_some()
    }

    /// Take ownership of `block` and return its handle.
    ///
    /// Returns `None`, dropping the block, when no entry is free and the
    /// table cannot grow.
    pub(crate) fn insert(&mut self, block: OpaqueBlock) -> Option<u64> {
        if let Some(index) = self.free_head {
            let entry = &mut self.entries[index as usize];
            if let Entry::Vacant {
                generation,
                next_free,
            } = *entry
            {
                self.free_head = next_free;
                *entry = Entry::Live { generation, block };
                self.live += 1;
                return Some(pack(index, generation));
            }
        }
        let index = next_index(self.entries.len(), self.max_entries)?;
        self.entries.push(Entry::Live {
            generation: 0,
            block,
        });
        self.live += 1;
        Some(pack(index, 0))
    }

    /// Borrow the block behind `handle`, if it is still live.
    pub(crate) fn get(&self, handle: u64) -> Option<&OpaqueBlock> {
        let (index, expected) = unpack(handle)?;
        match self.entries.get(index as usize)? {
            Entry::Live { generation, block } if *generation == expected => Some(block),
            _ => None,
        }
    }

    /// Release the block behind `handle`, returning it to the caller.
    ///
    /// A generation that wraps back to zero retires the entry for good, so
    /// a handle from the first epoch can never match again.
    pub(crate) fn remove(&mut self, handle: u64) -> Option<OpaqueBlock> {
        let (index, expected) = unpack(handle)?;
        let entry = self.entries.get_mut(index as usize)?;
        let generation = match entry {
            Entry::Live { generation, .. } if *generation == expected => *generation,
            _ => return None,
        };
        let next_generation = generation.wrapping_add(1);
        let retired = next_generation == 0;
        let vacant = Entry::Vacant {
            generation: next_generation,
            next_free: if retired { None } else { self.free_head },
        };
        let Entry::Live { block, .. } = std::mem::replace(entry, vacant) else {
            return None;
        };
        if !retired {
            self.free_head = Some(index);
        }
        self.live -= 1;
        Some(block)
    }

    /// Number of blocks not yet released.
    pub(crate) fn live(&self) -> usize {
        self.live
    }
}
