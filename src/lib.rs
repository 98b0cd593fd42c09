//! Host runtime for the rain-rs tipping-bucket rain gauge
//!
//! Wires the hardware-independent `rain-core` aggregator to a Linux pulse
//! source (sysfs GPIO or a simulated gauge), the file and console sinks, and
//! the command line.

pub mod app;
pub mod cli;
pub mod delay;
pub mod sensors;
pub mod sinks;

pub use app::{AppError, run_cli};
