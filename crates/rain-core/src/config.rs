//! Calibration and debounce configuration
//!
//! Everything in here is supplied once at startup and never changes while the
//! aggregator runs.

use thiserror_no_std::Error;

use crate::storage::{MAX_SLOTS, WINDOW_MINUTES};

pub const DEFAULT_INTERVAL_MINUTES: u8 = 5;
pub const DEFAULT_BUCKET_VOLUME: u16 = 5;
/// The reference collector measures 127.455166 cm²; only whole units are accepted.
pub const DEFAULT_COLLECTOR_AREA: u16 = 127;
pub const DEFAULT_PIN: u8 = 0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {field} ({min}..{max}): {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

/// Device calibration and polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConfig {
    /// Polling period in minutes (1..=60)
    pub interval_minutes: u8,
    /// Milliliters registered per bucket tip (1..=1000)
    pub bucket_volume: u16,
    /// Funnel catchment area in square centimeters (1..=10000)
    pub collector_area: u16,
    /// GPIO selector handed to the pulse source (0..=63)
    pub pin: u8,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            bucket_volume: DEFAULT_BUCKET_VOLUME,
            collector_area: DEFAULT_COLLECTOR_AREA,
            pin: DEFAULT_PIN,
        }
    }
}

impl CalibrationConfig {
    /// Validate raw values and build a configuration.
    ///
    /// Fields are checked in the order bucket volume, pin, interval, collector
    /// area; the first value outside its range is reported.
    pub fn new(
        interval_minutes: i64,
        bucket_volume: i64,
        collector_area: i64,
        pin: i64,
    ) -> Result<Self, ConfigError> {
        let bucket_volume = check_range("bucket volume", bucket_volume, 1, 1000)?;
        let pin = check_range("gpio", pin, 0, 63)?;
        let interval_minutes = check_range("interval", interval_minutes, 1, 60)?;
        let collector_area = check_range("collector area", collector_area, 1, 10_000)?;

        Ok(Self {
            interval_minutes: interval_minutes as u8,
            bucket_volume: bucket_volume as u16,
            collector_area: collector_area as u16,
            pin: pin as u8,
        })
    }

    /// Number of ring slots covering the rolling window.
    ///
    /// Integer division: an interval that does not divide 60 yields a window
    /// shorter than one hour (7 minutes gives 8 slots, i.e. 56 minutes).
    pub const fn slot_count(&self) -> usize {
        let slots = WINDOW_MINUTES / self.interval_minutes as usize;
        if slots == 0 {
            1
        } else if slots > MAX_SLOTS {
            MAX_SLOTS
        } else {
            slots
        }
    }

    /// Minutes actually covered by a full ring.
    pub const fn window_minutes(&self) -> usize {
        self.slot_count() * self.interval_minutes as usize
    }

    pub const fn interval_secs(&self) -> u32 {
        self.interval_minutes as u32 * 60
    }

    pub const fn interval_ms(&self) -> u32 {
        self.interval_secs() * 1000
    }
}

/// Contact debounce parameters for the tipping-bucket switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Minimum spacing between two counted tips
    pub min_trigger_interval_ms: u64,
    /// How long the contact must stay closed before a tip is recognized
    pub min_hold_ms: u64,
    /// The switch pulls the line low when closed (pull-up wiring)
    pub active_low: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            min_trigger_interval_ms: 500,
            min_hold_ms: 5,
            active_low: true,
        }
    }
}
