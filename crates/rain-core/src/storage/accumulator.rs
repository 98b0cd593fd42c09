use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use super::RingBuffer;
use crate::config::CalibrationConfig;
use crate::output::{self, RateSink, SinkError};
use crate::rate::{self, FormattedRate};
use crate::sensors::PulseCounterSource;

/// Last cumulative count seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub last_observed: u32,
}

impl CounterState {
    pub const fn new(initial: u32) -> Self {
        Self {
            last_observed: initial,
        }
    }

    /// Turn a new cumulative reading into the number of tips since the last one.
    ///
    /// A reading below the previous one means the counter wrapped. The old
    /// reading is then treated as zero, so the interval only counts the tips
    /// after the wrap; the ones before it are lost. Returns the delta and
    /// whether a wrap was detected.
    pub fn advance(&mut self, new_count: u32) -> (u32, bool) {
        let overflowed = new_count < self.last_observed;
        if overflowed {
            self.last_observed = 0;
        }
        let events = new_count - self.last_observed;
        self.last_observed = new_count;
        (events, overflowed)
    }
}

/// Outcome of one poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainfallReading {
    /// Tips counted during the interval that just ended
    pub events: u32,
    /// Tips across the whole ring
    pub events_per_hour: u64,
    /// Calibrated rate derived from `events_per_hour`
    pub rate_per_hour: f64,
    /// The counter wrapped during this interval
    pub overflowed: bool,
}

impl RainfallReading {
    pub fn formatted(&self) -> FormattedRate {
        FormattedRate::new(self.rate_per_hour)
    }
}

/// Rolling hourly rainfall aggregator
///
/// Polls a [`PulseCounterSource`] once per interval, stores each interval's
/// tip delta in a fixed [`RingBuffer`] covering roughly one hour, and turns the
/// ring total into a rate using the calibration.
///
/// ## Window
///
/// - **Slots**: `60 / interval_minutes`, truncated (7 minutes → 8 slots)
/// - **Cold start**: slots begin at zero, so the first `slots` readings
///   under-report
///
/// ## Usage
///
/// ```rust,ignore
/// let counter = PulseCounter::new();
/// let mut aggregator = RainRateAggregator::new(&config, &counter);
///
/// // Blocks forever, returning only when a sink fails
/// let err = aggregator.run(&mut delay, &mut [&mut file_sink]).unwrap_err();
/// ```
pub struct RainRateAggregator<'a, S>
where
    S: PulseCounterSource + ?Sized,
{
    source: &'a S,
    config: CalibrationConfig,
    ring: RingBuffer,
    counter: CounterState,
}

impl<'a, S> RainRateAggregator<'a, S>
where
    S: PulseCounterSource + ?Sized,
{
    /// Size the ring from the calibration and take the starting count from `source`.
    pub fn new(config: &CalibrationConfig, source: &'a S) -> Self {
        let ring = RingBuffer::new(config.slot_count());
        let counter = CounterState::new(source.current_count());

        info!(
            "Rain aggregator started: {} slots x {} min ({} min window), initial count {}",
            ring.len(),
            config.interval_minutes,
            config.window_minutes(),
            counter.last_observed
        );

        Self {
            source,
            config: *config,
            ring,
            counter,
        }
    }

    /// Sample the source once and update the rolling window.
    ///
    /// Does not sleep; [`RainRateAggregator::run`] handles the cadence.
    pub fn poll(&mut self) -> RainfallReading {
        let new_count = self.source.current_count();
        let previous = self.counter.last_observed;
        let (events, overflowed) = self.counter.advance(new_count);

        if overflowed {
            warn!(
                "Pulse counter wrapped ({} -> {}), counting this interval from zero",
                previous, new_count
            );
        }

        self.ring.push(events);
        let events_per_hour = self.ring.sum();
        let rate_per_hour = rate::rate_per_hour(events_per_hour, &self.config);

        debug!(
            "Interval tips: {}, window tips: {}, rate: {:.2}",
            events, events_per_hour, rate_per_hour
        );

        RainfallReading {
            events,
            events_per_hour,
            rate_per_hour,
            overflowed,
        }
    }

    /// Sleep one interval, poll, publish; forever.
    ///
    /// Only returns when a sink fails, carrying that error.
    pub fn run<D: DelayNs>(
        &mut self,
        delay: &mut D,
        sinks: &mut [&mut dyn RateSink],
    ) -> Result<Infallible, SinkError> {
        let interval_ms = self.config.interval_ms();
        loop {
            delay.delay_ms(interval_ms);
            let reading = self.poll();
            output::emit(&reading.formatted(), sinks)?;
        }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    pub fn ring(&self) -> &RingBuffer {
        &self.ring
    }

    pub fn counter_state(&self) -> CounterState {
        self.counter
    }
}
