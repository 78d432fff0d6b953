use anyhow::Result;
use clap::Parser;
use hwsens::config::AppConfig;
use hwsens::core::UpdateManager;
use hwsens::report;
use hwsens_core::BoxedSourceAdapter;
use hwsens_sources::SimulatedSource;
use log::{info, warn};
use std::path::PathBuf;

/// hwsens - hardware sensor history, min/max tracking and alarms for Linux
#[derive(Parser, Debug, Clone)]
#[command(name = "hwsens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Refresh period in milliseconds (overrides the config file)
    #[arg(short = 'i', long = "interval", value_name = "MS")]
    interval: Option<u64>,

    /// Samples kept per sensor (overrides the config file)
    #[arg(short = 'b', long = "buffer", value_name = "SAMPLES")]
    buffer: Option<usize>,

    /// Stop after this many refreshes (0 runs until interrupted)
    #[arg(short = 'c', long = "count", value_name = "N")]
    count: Option<u64>,

    /// Use simulated sensors instead of probing hardware
    #[arg(short = 's', long = "simulate")]
    simulate: bool,

    /// List discovered sensors and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Configuration file to use instead of the default location
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    if let Some(interval) = cli.interval {
        config.update_interval_ms = interval;
    }
    if let Some(buffer) = cli.buffer {
        config.buffer_length = buffer;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only, so alarms stand out
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting hwsens v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    let mut adapters: Vec<BoxedSourceAdapter> = if cli.simulate {
        vec![Box::new(SimulatedSource::demo())]
    } else {
        hwsens_sources::initialize_sensors();
        hwsens_sources::default_adapters()
    };

    let mut registry = hwsens_sources::discover_all(&mut adapters, config.buffer_length)?;
    config.apply(&mut registry)?;

    if cli.list {
        for sensor in registry.iter() {
            println!(
                "{:<40} {:<28} {}",
                sensor.id(),
                sensor.name(),
                sensor.sensor_type().describe()
            );
        }
        return Ok(());
    }

    if registry.is_empty() {
        warn!("No sensors found; try --simulate");
        return Ok(());
    }

    for sensor in registry.iter_mut() {
        sensor.set_on_alarm_raised(|sensor| {
            let value = sensor
                .current_value()
                .map(|v| sensor.value_to_display_string(v))
                .unwrap_or_default();
            warn!(
                "Alarm: {} reached {} (limit {})",
                sensor.name(),
                value,
                sensor.value_to_display_string(sensor.alarm_limit())
            );
        });
    }

    let period = config.update_interval();
    let mut manager = UpdateManager::new(registry, adapters);

    let max_ticks = cli.count.filter(|&n| n > 0);
    let run = manager.run(period, max_ticks, |registry| {
        println!("--- {}", chrono::Local::now().format("%H:%M:%S"));
        print!("{}", report::format_summary(registry));
    });

    tokio::select! {
        _ = run => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    Ok(())
}
