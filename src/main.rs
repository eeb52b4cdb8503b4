//! Simulated numeric sensor run.
//!
//! Usage:
//!   cargo run --bin sensor-sim -- --step 0.5 --pause-every 10
//!
//! Drives a simulated encoder through a shared numeric sensor and logs the
//! feedback value a controller would sample, toggling pause periodically.

use clap::Parser;
use log::{error, info};
use numeric_sensor::config::{self, SensorConfig};
use numeric_sensor::sources::{SimulatedSource, run_ramp_simulation};
use numeric_sensor::{PidSource, PidSourceType, RawReading, SharedNumericSensor};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::time::{Duration, interval};

#[derive(Parser, Debug)]
#[command(name = "sensor-sim", about = "Sample a simulated numeric sensor")]
struct Args {
    /// JSON sensor config file (overrides SENSOR_* environment variables)
    #[arg(long, env = "SENSOR_CONFIG")]
    config: Option<PathBuf>,

    /// Scale factor applied at read time
    #[arg(long)]
    scale_factor: Option<f64>,

    /// PID source type: rate or displacement
    #[arg(long, value_parser = PidSourceType::from_name)]
    pid_source_type: Option<PidSourceType>,

    /// Initial raw reading of the simulated source
    #[arg(long, default_value_t = 0.0)]
    initial_raw: f64,

    /// Value the sensor is set to at startup
    #[arg(long)]
    set: Option<f64>,

    /// Raw increment per simulation tick
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Simulation and sampling period in milliseconds
    #[arg(long, default_value_t = 100)]
    period_ms: u64,

    /// Toggle pause every N samples (0 disables)
    #[arg(long, default_value_t = 0)]
    pause_every: u64,

    /// Stop after N samples (0 runs until Ctrl+C)
    #[arg(long, default_value_t = 0)]
    samples: u64,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn load_config(args: &Args) -> numeric_sensor::Result<SensorConfig> {
    let mut config = match &args.config {
        Some(path) => SensorConfig::from_file(path)?,
        None => SensorConfig::from_env(),
    };
    if let Some(scale) = args.scale_factor {
        config.scale_factor = scale;
    }
    if let Some(kind) = args.pid_source_type {
        config.pid_source_type = kind;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    config::load_dotenv();
    init_logger();
    let args = Args::parse();

    info!("Starting sensor simulation");

    let sensor_config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load sensor config: {}", e);
            std::process::exit(1);
        }
    };
    info!("Configuration loaded:");
    info!("  Offset: {}", sensor_config.offset);
    info!("  Scale factor: {}", sensor_config.scale_factor);
    info!("  PID source type: {}", sensor_config.pid_source_type);

    let raw = SimulatedSource::new(args.initial_raw);
    let sensor = Arc::new(SharedNumericSensor::from_sensor(
        sensor_config.build(raw.clone()),
    ));
    if let Some(value) = args.set {
        sensor.set(value);
        info!("Sensor set to {}", value);
    }

    let period = Duration::from_millis(args.period_ms.max(1));
    let sim_task = run_ramp_simulation(raw.clone(), args.step, period);

    let sampler = {
        let sensor = Arc::clone(&sensor);
        let raw = raw.clone();
        let pause_every = args.pause_every;
        let samples = args.samples;
        tokio::spawn(async move {
            let mut ticker = interval(period);
            let mut count = 0u64;
            loop {
                ticker.tick().await;
                count += 1;
                info!(
                    "[{}] raw={:.3} feedback={:.3} paused={}",
                    sensor.pid_source_type(),
                    raw.raw_reading(),
                    sensor.pid_get(),
                    sensor.is_paused()
                );
                if pause_every > 0 && count % pause_every == 0 {
                    if sensor.is_paused() {
                        sensor.unpause();
                        info!("Sensor unpaused");
                    } else {
                        sensor.pause();
                        info!("Sensor paused");
                    }
                }
                if samples > 0 && count >= samples {
                    break;
                }
            }
        })
    };

    info!("Press Ctrl+C to exit");

    tokio::select! {
        result = signal::ctrl_c() => match result {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        },
        _ = sampler => info!("Sample limit reached"),
    }

    sim_task.abort();
    info!(
        "Sensor simulation stopped after {} baseline changes",
        sensor.version()
    );
}
