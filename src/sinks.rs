//! File and console sinks for the hourly rate

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rain_core::{FormattedRate, RateSink, SinkError, UNIT_SUFFIX};

/// Rewrites a single-line file with the latest rate every interval.
///
/// The file is truncated on each write, so readers always see exactly one
/// value and no unit.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateSink for FileSink {
    fn write_rate(&mut self, rate: &FormattedRate) -> Result<(), SinkError> {
        let mut file = File::create(&self.path).map_err(|e| SinkError::Open {
            target: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        writeln!(file, "{}", rate).map_err(|e| SinkError::Write {
            target: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Prints the rate with its unit, one line per interval.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RateSink for ConsoleSink<W> {
    fn write_rate(&mut self, rate: &FormattedRate) -> Result<(), SinkError> {
        writeln!(self.out, "{} {}", rate, UNIT_SUFFIX)
            .and_then(|()| self.out.flush())
            .map_err(|e| SinkError::Write {
                target: "console".to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_line_format() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.write_rate(&FormattedRate::new(76.2)).unwrap();
        sink.write_rate(&FormattedRate::new(0.0)).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "76.20 mm/m2\n0.00 mm/m2\n");
    }

    #[test]
    fn test_console_write_failure_is_reported() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = ConsoleSink::new(Closed);
        let err = sink.write_rate(&FormattedRate::new(1.0)).unwrap_err();
        assert!(matches!(err, SinkError::Write { .. }));
    }
}
