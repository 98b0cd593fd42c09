use core::sync::atomic::{AtomicU32, Ordering};

use super::PulseCounterSource;

/// Shared cumulative tip counter.
///
/// One producer (an edge interrupt or a sampling thread) calls
/// [`PulseCounter::record_pulse`]; the aggregator reads it through
/// [`PulseCounterSource`]. Can live in a `static`.
///
/// ```rust
/// use rain_core::{PulseCounter, PulseCounterSource};
///
/// static TIPS: PulseCounter = PulseCounter::new();
///
/// TIPS.record_pulse();
/// assert_eq!(TIPS.current_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PulseCounter {
    count: AtomicU32,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Start from an arbitrary count (mostly useful to exercise wraparound).
    pub const fn starting_at(count: u32) -> Self {
        Self {
            count: AtomicU32::new(count),
        }
    }

    /// Count one tip. Wraps to zero past `u32::MAX`.
    ///
    /// Returns the new cumulative count.
    pub fn record_pulse(&self) -> u32 {
        self.count.fetch_add(1, Ordering::Release).wrapping_add(1)
    }

    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }
}

impl PulseCounterSource for PulseCounter {
    fn current_count(&self) -> u32 {
        self.count()
    }
}
