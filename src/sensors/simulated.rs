use std::time::{Duration, Instant};

use rain_core::PulseCounterSource;

/// Synthetic rain gauge for running without hardware.
///
/// Rain intensity follows `base × (1 + sin(t / period))` tips per second, which
/// never goes negative. The cumulative tip count is the closed-form integral
/// of that curve, so it only grows (until it wraps at `u32`).
#[derive(Debug, Clone)]
pub struct SimulatedGauge {
    started: Instant,
    /// Mean tips per second
    base_tips_per_sec: f64,
    /// Seconds per radian of the intensity cycle
    period_secs: f64,
}

impl Default for SimulatedGauge {
    fn default() -> Self {
        // About 36 tips an hour on average, one shower every ~3 hours
        Self::new(0.01, 1800.0)
    }
}

impl SimulatedGauge {
    pub fn new(base_tips_per_sec: f64, period_secs: f64) -> Self {
        Self {
            started: Instant::now(),
            base_tips_per_sec,
            period_secs,
        }
    }

    /// Cumulative tips after `elapsed` of simulated time.
    pub fn tips_after(&self, elapsed: Duration) -> u32 {
        let t = elapsed.as_secs_f64();
        let p = self.period_secs;
        let total = self.base_tips_per_sec * (t + p - p * (t / p).cos());
        // Truncating through u64 wraps like the hardware counter does.
        total as u64 as u32
    }
}

impl PulseCounterSource for SimulatedGauge {
    fn current_count(&self) -> u32 {
        self.tips_after(self.started.elapsed())
    }
}
