//! Hardware-independent core library for rain-rs
//!
//! This crate contains all platform-agnostic logic for the tipping-bucket rain
//! gauge: calibration constants, pulse counting and debouncing, the rolling
//! ring of per-interval pulse deltas, rate conversion and the sink contract
//! used to publish the hourly rainfall rate.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the host binary and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod output;
pub mod rate;
pub mod sensors;
pub mod storage;

pub use config::{CalibrationConfig, ConfigError, DebounceConfig};
pub use output::{RateSink, SinkError};
pub use rate::{FormattedRate, UNIT_SUFFIX};
pub use sensors::{Debouncer, PulseCounter, PulseCounterSource};
pub use storage::{RainRateAggregator, RainfallReading, RingBuffer};
