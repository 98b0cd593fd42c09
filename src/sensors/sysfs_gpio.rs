//! Tip counting on a Linux GPIO line through the sysfs interface
//!
//! A background thread samples the pin's `value` file every millisecond and
//! feeds a [`Debouncer`]; counted tips go into a shared [`PulseCounter`] that
//! the aggregator reads without locking.
//!
//! Pull-up configuration cannot be done through sysfs. The reed contact is
//! expected to be wired with an external (or board default) pull-up, closing
//! to ground.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{info, warn};
use rain_core::{DebounceConfig, Debouncer, PulseCounter, PulseCounterSource};
use thiserror_no_std::Error;

/// Default sysfs GPIO class directory
pub const GPIO_ROOT: &str = "/sys/class/gpio";

const SAMPLE_PERIOD: Duration = Duration::from_millis(1);

#[derive(Error, Debug)]
pub enum GpioError {
    #[error("Cannot export gpio {pin} via {path}: {reason}")]
    Export {
        pin: u8,
        path: String,
        reason: String,
    },
    #[error("Cannot configure gpio {pin} at {path}: {reason}")]
    Configure {
        pin: u8,
        path: String,
        reason: String,
    },
    #[error("Cannot start sampling thread for gpio {pin}: {reason}")]
    Spawn { pin: u8, reason: String },
}

/// Debounced tip counter on one sysfs GPIO pin.
///
/// Dropping it stops and joins the sampling thread.
pub struct SysfsGpioCounter {
    pin: u8,
    counter: Arc<PulseCounter>,
    running: Arc<AtomicBool>,
    sampler: Option<JoinHandle<()>>,
}

impl SysfsGpioCounter {
    /// Export `pin` under [`GPIO_ROOT`] if needed and start counting.
    pub fn start(pin: u8, debounce: DebounceConfig) -> Result<Self, GpioError> {
        Self::start_at(Path::new(GPIO_ROOT), pin, debounce)
    }

    /// Same as [`SysfsGpioCounter::start`] with a custom sysfs root.
    pub fn start_at(root: &Path, pin: u8, debounce: DebounceConfig) -> Result<Self, GpioError> {
        let pin_dir = root.join(format!("gpio{pin}"));

        if !pin_dir.exists() {
            let export = root.join("export");
            fs::write(&export, pin.to_string()).map_err(|e| GpioError::Export {
                pin,
                path: export.display().to_string(),
                reason: e.to_string(),
            })?;
            info!("Exported gpio {} via {}", pin, export.display());
        }

        let direction = pin_dir.join("direction");
        fs::write(&direction, "in").map_err(|e| configure_error(pin, &direction, e))?;

        let value_path = pin_dir.join("value");
        let value = File::open(&value_path).map_err(|e| configure_error(pin, &value_path, e))?;

        let counter = Arc::new(PulseCounter::new());
        let running = Arc::new(AtomicBool::new(true));

        let sampler = {
            let counter = Arc::clone(&counter);
            let running = Arc::clone(&running);
            let debouncer = Debouncer::new(debounce);
            thread::Builder::new()
                .name(format!("pulse-gpio{pin}"))
                .spawn(move || sample_loop(value, value_path, debouncer, &counter, &running))
                .map_err(|e| GpioError::Spawn {
                    pin,
                    reason: e.to_string(),
                })?
        };

        info!(
            "Counting tips on gpio {} (hold {} ms, lockout {} ms)",
            pin, debounce.min_hold_ms, debounce.min_trigger_interval_ms
        );

        Ok(Self {
            pin,
            counter,
            running,
            sampler: Some(sampler),
        })
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl PulseCounterSource for SysfsGpioCounter {
    fn current_count(&self) -> u32 {
        self.counter.count()
    }
}

impl Drop for SysfsGpioCounter {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(sampler) = self.sampler.take() {
            let _ = sampler.join();
        }
    }
}

fn configure_error(pin: u8, path: &Path, e: io::Error) -> GpioError {
    GpioError::Configure {
        pin,
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn sample_loop(
    mut value: File,
    value_path: PathBuf,
    mut debouncer: Debouncer,
    counter: &PulseCounter,
    running: &AtomicBool,
) {
    let started = Instant::now();
    let mut buf = [0u8; 8];
    let mut failing = false;

    while running.load(Ordering::Acquire) {
        match read_level(&mut value, &mut buf) {
            Ok(level) => {
                failing = false;
                let now_ms = started.elapsed().as_millis() as u64;
                if debouncer.update(now_ms, level) {
                    let total = counter.record_pulse();
                    log::debug!("Tip counted, total {}", total);
                }
            }
            Err(e) => {
                // Only report the first failure of a streak.
                if !failing {
                    warn!("Reading {} failed: {}", value_path.display(), e);
                    failing = true;
                }
            }
        }
        thread::sleep(SAMPLE_PERIOD);
    }
}

fn read_level(value: &mut File, buf: &mut [u8; 8]) -> io::Result<bool> {
    value.seek(SeekFrom::Start(0))?;
    let n = value.read(buf)?;
    match buf[..n].first() {
        Some(b'0') => Ok(false),
        Some(b'1') => Ok(true),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "expected '0' or '1'",
        )),
    }
}
