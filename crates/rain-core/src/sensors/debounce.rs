use crate::config::DebounceConfig;

/// Time-stamped debouncer for the tipping-bucket reed contact.
///
/// Feed it every line sample together with a monotonic millisecond
/// timestamp. A tip is recognized once the line has been held at the active
/// level for `min_hold_ms`, and counted only if at least
/// `min_trigger_interval_ms` have passed since the previous counted tip.
/// Each closure counts at most once; the line has to return to idle before
/// the next one can be recognized.
#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    /// When the current closure started, if the line is active
    active_since: Option<u64>,
    /// This closure was already recognized (counted or rejected)
    latched: bool,
    last_pulse_ms: Option<u64>,
}

impl Debouncer {
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            active_since: None,
            latched: false,
            last_pulse_ms: None,
        }
    }

    /// Process one sample. Returns `true` exactly when a tip is counted.
    pub fn update(&mut self, now_ms: u64, level: bool) -> bool {
        let active = level != self.config.active_low;
        if !active {
            self.active_since = None;
            self.latched = false;
            return false;
        }

        if self.latched {
            return false;
        }

        let since = *self.active_since.get_or_insert(now_ms);
        if now_ms.saturating_sub(since) < self.config.min_hold_ms {
            return false;
        }

        self.latched = true;

        if let Some(last) = self.last_pulse_ms {
            if now_ms.saturating_sub(last) < self.config.min_trigger_interval_ms {
                log::trace!("tip ignored, {} ms after previous", now_ms - last);
                return false;
            }
        }

        self.last_pulse_ms = Some(now_ms);
        true
    }
}
