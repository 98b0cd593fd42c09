pub mod accumulator;
pub mod ring_buffer;

pub use accumulator::*;
pub use ring_buffer::RingBuffer;

/// Nominal length of the rolling window in minutes
pub const WINDOW_MINUTES: usize = 60;

/// Maximum number of ring slots (one-minute interval over a full hour)
pub const MAX_SLOTS: usize = WINDOW_MINUTES;
