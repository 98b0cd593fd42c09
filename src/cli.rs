//! Command-line options
//!
//! Flag letters follow the classic rain sensor tool (`-b -c -f -i -p -s`).
//! Numbers are accepted as plain signed integers here; range checks live in
//! [`CalibrationConfig::new`] so negative values get the same message as
//! any other out-of-range value.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rain_core::{CalibrationConfig, ConfigError, DebounceConfig};

use crate::app::AppError;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rain-rs",
    version,
    about = "Rolling hourly rainfall rate from a tipping-bucket rain gauge"
)]
pub struct Cli {
    /// Milliliters per bucket tip (1..1000)
    #[arg(
        short = 'b',
        long = "bucket-volume",
        value_name = "N",
        default_value_t = 5,
        allow_negative_numbers = true
    )]
    pub bucket_volume: i64,

    /// GPIO pin the gauge is wired to (0..63)
    #[arg(
        short = 'c',
        long = "gpio",
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub gpio: i64,

    /// File to write the hourly rainfall into
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Minutes between updates (1..60)
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "N",
        default_value_t = 5,
        allow_negative_numbers = true
    )]
    pub interval: i64,

    /// Print updates to stdout too
    #[arg(short = 'p', long = "print")]
    pub print: bool,

    /// Collector area in square centimeters (1..10000)
    #[arg(
        short = 's',
        long = "collector-area",
        value_name = "N",
        default_value_t = 127,
        allow_negative_numbers = true
    )]
    pub collector_area: i64,

    /// Minimum time between two counted tips
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub min_trigger_interval_ms: u64,

    /// Minimum time the contact must stay closed for a tip
    #[arg(long, value_name = "MS", default_value_t = 5)]
    pub min_hold_ms: u64,

    /// Use a synthetic gauge instead of the GPIO pin
    #[arg(long)]
    pub simulate: bool,
}

/// Where tips come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Gpio,
    Simulated,
}

/// Enabled sinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub file: Option<PathBuf>,
    pub print_to_console: bool,
}

/// Fully validated runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub calibration: CalibrationConfig,
    pub debounce: DebounceConfig,
    pub output: OutputOptions,
    pub source: SourceKind,
}

/// What the process should do after parsing.
#[derive(Debug)]
pub enum Command {
    /// Print this text to stdout and exit successfully
    Help(String),
    Run(Settings),
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let calibration =
            CalibrationConfig::new(self.interval, self.bucket_volume, self.collector_area, self.gpio)?;

        Ok(Settings {
            calibration,
            debounce: DebounceConfig {
                min_trigger_interval_ms: self.min_trigger_interval_ms,
                min_hold_ms: self.min_hold_ms,
                ..DebounceConfig::default()
            },
            output: OutputOptions {
                file: self.file,
                print_to_console: self.print,
            },
            source: if self.simulate {
                SourceKind::Simulated
            } else {
                SourceKind::Gpio
            },
        })
    }
}

/// Parse `args` (including the program name) into a [`Command`].
///
/// Help, version and unknown options all print usage and exit successfully,
/// as the classic tool does; malformed or out-of-range values are errors.
pub fn parse_args<I, T>(args: I) -> Result<Command, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Command::Run(cli.into_settings()?)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(Command::Help(e.render().to_string()))
            }
            ErrorKind::UnknownArgument => {
                Ok(Command::Help(Cli::command().render_help().to_string()))
            }
            _ => Err(AppError::Usage(e.render().to_string())),
        },
    }
}
