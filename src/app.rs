//! Process wiring: settings in, endless aggregation loop, exit status out

use std::convert::Infallible;
use std::ffi::OsString;
use std::process::ExitCode;

use log::{info, warn};
use rain_core::{
    CalibrationConfig, ConfigError, PulseCounterSource, RainRateAggregator, RateSink, SinkError,
};
use thiserror_no_std::Error;

use crate::cli::{self, Command, OutputOptions, Settings, SourceKind};
use crate::delay::StdDelay;
use crate::sensors::{GpioError, SimulatedGauge, SysfsGpioCounter};
use crate::sinks::{ConsoleSink, FileSink};

/// Every way the process can fail. All of them are fatal.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Config(ConfigError),
    #[error("{0}")]
    Gpio(GpioError),
    #[error("{0}")]
    Sink(SinkError),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Config(_) | Self::Gpio(_) | Self::Sink(_) => 1,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GpioError> for AppError {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

impl From<SinkError> for AppError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

/// Parse the command line and run until a fatal error.
pub fn run_cli<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let result = cli::parse_args(args).and_then(|command| match command {
        Command::Help(text) => {
            print!("{text}");
            Ok(())
        }
        Command::Run(settings) => run(settings).map(|never| match never {}),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Open the pulse source and aggregate forever.
///
/// Returns only with the error that ended the run.
pub fn run(settings: Settings) -> Result<Infallible, AppError> {
    let Settings {
        calibration,
        debounce,
        output,
        source,
    } = settings;

    info!(
        "Starting rain-rs: interval {} min, bucket {} ml, collector {} cm2, gpio {}",
        calibration.interval_minutes,
        calibration.bucket_volume,
        calibration.collector_area,
        calibration.pin
    );

    match source {
        SourceKind::Gpio => {
            let gpio = SysfsGpioCounter::start(calibration.pin, debounce)?;
            aggregate(&gpio, &calibration, output)
        }
        SourceKind::Simulated => {
            info!("Using simulated gauge");
            let gauge = SimulatedGauge::default();
            aggregate(&gauge, &calibration, output)
        }
    }
}

fn aggregate<S: PulseCounterSource>(
    source: &S,
    calibration: &CalibrationConfig,
    output: OutputOptions,
) -> Result<Infallible, AppError> {
    let mut file_sink = output.file.map(FileSink::new);
    let mut console_sink = output.print_to_console.then(ConsoleSink::stdout);

    let mut sinks: Vec<&mut dyn RateSink> = Vec::with_capacity(2);
    if let Some(sink) = file_sink.as_mut() {
        info!("Writing hourly rainfall to {}", sink.path().display());
        sinks.push(sink);
    }
    if let Some(sink) = console_sink.as_mut() {
        sinks.push(sink);
    }
    if sinks.is_empty() {
        warn!("No output enabled; rates are only visible at debug log level");
    }

    let mut aggregator = RainRateAggregator::new(calibration, source);
    let err = match aggregator.run(&mut StdDelay, &mut sinks) {
        Ok(never) => match never {},
        Err(e) => e,
    };
    Err(err.into())
}
