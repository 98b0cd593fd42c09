//! Output sinks for the rolling rainfall rate
//!
//! A sink receives the already formatted rate once per interval. Sinks are
//! called in order and the first failure stops the round: there are no
//! retries and no fallback sink.

use alloc::string::String;

use thiserror_no_std::Error;

use crate::rate::FormattedRate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Cannot open file {target}: {reason}")]
    Open { target: String, reason: String },
    #[error("Cannot write to {target}: {reason}")]
    Write { target: String, reason: String },
}

/// Destination for the per-interval rate.
pub trait RateSink {
    fn write_rate(&mut self, rate: &FormattedRate) -> Result<(), SinkError>;
}

impl<T: RateSink + ?Sized> RateSink for &mut T {
    fn write_rate(&mut self, rate: &FormattedRate) -> Result<(), SinkError> {
        (**self).write_rate(rate)
    }
}

/// Hand the same rendered value to every sink, stopping at the first error.
pub fn emit(rate: &FormattedRate, sinks: &mut [&mut dyn RateSink]) -> Result<(), SinkError> {
    for sink in sinks.iter_mut() {
        sink.write_rate(rate)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl RateSink for Recorder {
        fn write_rate(&mut self, rate: &FormattedRate) -> Result<(), SinkError> {
            self.lines.push(rate.as_str().to_string());
            Ok(())
        }
    }

    struct Broken;

    impl RateSink for Broken {
        fn write_rate(&mut self, _rate: &FormattedRate) -> Result<(), SinkError> {
            Err(SinkError::Open {
                target: "rain.txt".to_string(),
                reason: "permission denied".to_string(),
            })
        }
    }

    #[test]
    fn test_every_sink_gets_identical_text() {
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        let rate = FormattedRate::new(76.2);

        emit(&rate, &mut [&mut a, &mut b]).unwrap();

        assert_eq!(a.lines, ["76.20"]);
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn test_first_failure_stops_the_round() {
        let mut broken = Broken;
        let mut after = Recorder::default();

        let err = emit(&FormattedRate::new(1.0), &mut [&mut broken, &mut after]).unwrap_err();

        assert_eq!(
            alloc::format!("{}", err),
            "Cannot open file rain.txt: permission denied"
        );
        assert!(after.lines.is_empty(), "sinks after a failure must not run");
    }

    #[test]
    fn test_no_sinks_is_ok() {
        assert!(emit(&FormattedRate::new(0.0), &mut []).is_ok());
    }
}
