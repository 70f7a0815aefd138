//! Drives the diorama over a serial port
//!
//! Simulates the day cycle in real time, streams every frame to the
//! microcontroller and shows the current state on a single terminal line.

mod transport;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use diorama_light_cycle::cycle::{
    DEFAULT_FILTER_HALF_LIFE, DEFAULT_REFRESH_RATE, DEFAULT_SECONDS_PER_SIM_HOUR,
};
use diorama_light_cycle::{ColorOrder, CycleConfig, CycleDriver, Instant, Status};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::transport::SerialTransport;

#[derive(Parser)]
#[command(name = "diorama-light-host")]
#[command(about = "Stream a simulated day/night cycle to the diorama lights", long_about = None)]
struct Cli {
    /// Serial port of the microcontroller (e.g. COM3, /dev/ttyUSB0)
    port: String,

    /// Real seconds in which one simulated hour passes
    #[arg(long, default_value_t = DEFAULT_SECONDS_PER_SIM_HOUR, value_parser = parse_positive_seconds)]
    seconds_per_sim_hour: f64,

    /// Real seconds after which a light has faded halfway to its target (0 disables easing)
    #[arg(long, default_value_t = DEFAULT_FILTER_HALF_LIFE, value_parser = parse_non_negative_seconds)]
    half_life: f64,

    /// Ticks per second
    #[arg(long, default_value_t = DEFAULT_REFRESH_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    refresh_rate: u32,

    /// Simulated hour at startup
    #[arg(long, default_value_t = 0.0, value_parser = parse_finite)]
    start_hour: f64,

    /// Channel order of the LED chips (rgb, rbg, grb, gbr, brg, bgr)
    #[arg(long, default_value = "gbr", value_parser = parse_color_order)]
    color_order: ColorOrder,

    /// Do not print the status line
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> CycleConfig {
        CycleConfig {
            seconds_per_sim_hour: self.seconds_per_sim_hour,
            filter_half_life_seconds: self.half_life,
            refresh_rate: self.refresh_rate,
            color_order: self.color_order,
            start_hour: self.start_hour,
        }
    }
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|err| format!("`{s}` is not a number: {err}"))?;
    if !value.is_finite() {
        return Err(format!("`{s}` is not a finite number"));
    }
    Ok(value)
}

fn parse_positive_seconds(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;
    if value <= 0.0 {
        return Err(format!("`{s}` must be greater than zero"));
    }
    Ok(value)
}

fn parse_non_negative_seconds(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;
    if value < 0.0 {
        return Err(format!("`{s}` must not be negative"));
    }
    Ok(value)
}

fn parse_color_order(s: &str) -> Result<ColorOrder, String> {
    ColorOrder::parse_from_str(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown color order `{s}`"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let transport = match SerialTransport::open(&cli.port) {
        Ok(transport) => transport,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };
    info!("Connected to {}", cli.port);

    match run(transport, cli.config(), cli.quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the day cycle until the link fails
fn run(transport: SerialTransport, config: CycleConfig, quiet: bool) -> Result<()> {
    let mut driver = CycleDriver::new(transport, config, Instant::now());
    let mut stdout = std::io::stdout().lock();

    loop {
        let sleep = driver.sleep_duration(Instant::now());
        std::thread::sleep(std::time::Duration::from_micros(sleep.as_micros()));

        let report = driver.tick(Instant::now())?;
        if report.sent() && !quiet {
            let status = Status::new(driver.clock(), driver.last_frame());
            write!(stdout, "{status}\r")?;
            stdout.flush()?;
        }
    }
}
