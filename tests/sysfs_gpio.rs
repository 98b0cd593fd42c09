use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use rain_core::{DebounceConfig, PulseCounterSource};
use rain_rs::sensors::{GpioError, SysfsGpioCounter};

/// Lay out a fake sysfs pin directory with the line idle (high).
fn fake_pin(root: &Path, pin: u8) {
    let dir = root.join(format!("gpio{pin}"));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("direction"), "out").unwrap();
    fs::write(dir.join("value"), "1\n").unwrap();
}

fn set_level(root: &Path, pin: u8, level: bool) {
    let text = if level { "1\n" } else { "0\n" };
    fs::write(root.join(format!("gpio{pin}")).join("value"), text).unwrap();
}

fn wait_for_count(source: &impl PulseCounterSource, expected: u32) -> u32 {
    let deadline = Instant::now() + Duration::from_secs(2);
    while source.current_count() < expected && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    source.current_count()
}

#[test]
fn test_configures_pin_as_input() {
    let root = tempfile::tempdir().unwrap();
    fake_pin(root.path(), 17);

    let counter = SysfsGpioCounter::start_at(root.path(), 17, DebounceConfig::default()).unwrap();

    assert_eq!(counter.pin(), 17);
    assert_eq!(
        fs::read_to_string(root.path().join("gpio17").join("direction")).unwrap(),
        "in"
    );
    assert_eq!(counter.current_count(), 0);
}

#[test]
fn test_counts_debounced_closures() {
    let root = tempfile::tempdir().unwrap();
    fake_pin(root.path(), 4);
    let debounce = DebounceConfig {
        min_trigger_interval_ms: 0,
        ..DebounceConfig::default()
    };
    let counter = SysfsGpioCounter::start_at(root.path(), 4, debounce).unwrap();

    set_level(root.path(), 4, false);
    assert_eq!(wait_for_count(&counter, 1), 1);

    // Holding the contact closed does not count again.
    thread::sleep(Duration::from_millis(50));
    assert_eq!(counter.current_count(), 1);

    set_level(root.path(), 4, true);
    thread::sleep(Duration::from_millis(50));
    set_level(root.path(), 4, false);
    assert_eq!(wait_for_count(&counter, 2), 2);
}

#[test]
fn test_missing_pin_is_exported_then_fails_to_configure() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("export"), "").unwrap();

    let err = match SysfsGpioCounter::start_at(root.path(), 9, DebounceConfig::default()) {
        Ok(_) => panic!("pin directory never appeared, start must fail"),
        Err(e) => e,
    };

    assert_eq!(fs::read_to_string(root.path().join("export")).unwrap(), "9");
    assert!(matches!(err, GpioError::Configure { pin: 9, .. }));
}

#[test]
fn test_missing_sysfs_root_is_export_error() {
    let root = tempfile::tempdir().unwrap();
    let absent = root.path().join("no-gpio-class");

    let err = match SysfsGpioCounter::start_at(&absent, 2, DebounceConfig::default()) {
        Ok(_) => panic!("start must fail without a sysfs root"),
        Err(e) => e,
    };
    assert!(matches!(err, GpioError::Export { pin: 2, .. }));
    assert!(err.to_string().contains("gpio 2"));
}
