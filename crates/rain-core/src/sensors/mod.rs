mod debounce;
mod pulse_counter;

pub use debounce::Debouncer;
pub use pulse_counter::PulseCounter;

/// Anything that can report the cumulative number of debounced bucket tips.
///
/// The count only grows, except that it wraps to a smaller value once the
/// `u32` range is exhausted. Implementations are already synchronized
/// internally; readers take `&self` and never lock.
pub trait PulseCounterSource {
    fn current_count(&self) -> u32;
}

impl<T: PulseCounterSource + ?Sized> PulseCounterSource for &T {
    fn current_count(&self) -> u32 {
        (**self).current_count()
    }
}
