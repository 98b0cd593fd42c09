use heapless::Vec;

use super::MAX_SLOTS;

/// Fixed-length ring of per-interval pulse deltas.
///
/// The length is chosen once at construction and never changes. Every push
/// overwrites exactly one slot, always the least recently written one, so the
/// sum of all slots is the pulse total over the trailing window.
///
/// Slots start at zero: until the ring has wrapped once, the sum under-reports
/// the hourly total.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    slots: Vec<u32, MAX_SLOTS>,
    cursor: usize,
}

impl RingBuffer {
    /// Create a zero-filled ring with `len` slots, clamped to `1..=MAX_SLOTS`.
    pub fn new(len: usize) -> Self {
        let len = len.clamp(1, MAX_SLOTS);
        Self {
            slots: core::iter::repeat_n(0, len).collect(),
            cursor: 0,
        }
    }

    /// Overwrite the oldest slot and advance the cursor.
    ///
    /// Returns the evicted value.
    pub fn push(&mut self, value: u32) -> u32 {
        let evicted = core::mem::replace(&mut self.slots[self.cursor], value);
        self.cursor = (self.cursor + 1) % self.slots.len();
        evicted
    }

    /// Sum of all slots.
    ///
    /// Accumulated in `u64` so a ring full of `u32::MAX` cannot overflow.
    pub fn sum(&self) -> u64 {
        self.slots.iter().map(|&v| v as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a ring has at least one slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the slot the next push will overwrite.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw slot contents in storage order (not chronological).
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }
}
