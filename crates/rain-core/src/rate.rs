//! Rate conversion and display formatting
//!
//! Converts an hourly pulse total into a rainfall rate using the device
//! calibration, and renders it the single way every sink sees it.

use core::fmt::{self, Write};

use crate::config::CalibrationConfig;

/// Unit label appended by human-facing sinks.
pub const UNIT_SUFFIX: &str = "mm/m2";

/// Convert an hourly pulse total into a rainfall rate.
///
/// The integer product is formed in the order pulses × area × volume before
/// the single floating-point division, so rounding matches the reference
/// gauge for every input. With the bounds enforced by [`CalibrationConfig`]
/// the product stays below `60 × u32::MAX × 10⁷`, well inside `u64`.
pub fn rate_per_hour(events_per_hour: u64, config: &CalibrationConfig) -> f64 {
    let product = events_per_hour * config.collector_area as u64 * config.bucket_volume as u64;
    product as f64 / 1000.0
}

/// A rate rendered as fixed-point with two decimals.
///
/// Cheap to copy around; built once per interval and handed to every sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRate {
    text: heapless::String<24>,
}

impl FormattedRate {
    /// Render `rate` with exactly two fractional digits.
    pub fn new(rate: f64) -> Self {
        let mut text = heapless::String::new();
        // The largest reachable rate has 16 integer digits, so 24 bytes always fit.
        let _ = write!(text, "{:.2}", rate);
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl fmt::Display for FormattedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
