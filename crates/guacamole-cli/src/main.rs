//! Guacamole HAL command-line front end.
//!
//! Drives the vendor HAL services against the device's sysfs tree, or
//! against a copy of it under `--sysfs-root`.
//!
//! # Usage
//!
//! ```bash
//! # Dim alpha for a backlight level
//! guacamole alpha 300
//!
//! # Follow the fingerprint dim amount as brightness changes
//! guacamole watch --interval-ms 250
//!
//! # Play a haptic effect against a fake node tree
//! guacamole --sysfs-root /tmp/guacamole effect heavy_click --strength light
//!
//! # Replay persisted settings, as done at boot
//! guacamole restore
//! ```

mod config;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use config::HalConfig;
use guacamole_core::{Effect, EffectStrength, Status};
use guacamole_fod::{CALIBRATION_TABLE, FingerprintInscreen, brightness_to_alpha};
use guacamole_hardware::{SysfsIo, UnavailableDisplayService, UnavailableFingerprintExtensions};
use guacamole_settings::{Preferences, Startup};
use guacamole_vibrator::Vibrator;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Guacamole vendor HAL
#[derive(Parser, Debug)]
#[command(name = "guacamole")]
#[command(author, version, about = "OnePlus 7 vendor HAL services", long_about = None)]
struct Cli {
    /// Logging level, used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory standing in for `/` when resolving sysfs nodes
    #[arg(long)]
    sysfs_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the dim alpha for a backlight level
    Alpha {
        #[arg(allow_negative_numbers = true)]
        brightness: i32,
    },

    /// Print the panel calibration table as JSON
    Table,

    /// Read the panel nodes and print the fingerprint dim amount
    DimAmount,

    /// Log the dim amount whenever it changes, until Ctrl-C
    Watch {
        /// Polling interval
        #[arg(short, long, default_value = "500")]
        interval_ms: u64,
    },

    /// Vibrate for a duration in milliseconds
    Vibrate { ms: u32 },

    /// Set the vibration amplitude (1-255)
    Amplitude { amplitude: u8 },

    /// Play a predefined effect
    Effect {
        /// click, double_click, tick, thud, pop, heavy_click or a HAL effect id
        name: Effect,

        #[arg(short, long, default_value = "medium")]
        strength: EffectStrength,
    },

    /// Stop vibrating
    Off,

    /// Restore persisted settings
    Restore {
        /// Preferences file, overriding the configuration
        #[arg(short, long)]
        preferences: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    debug!("guacamole v{}", guacamole_core::VERSION);

    let mut config = HalConfig::load_or_default(cli.config.as_deref())?;
    if let Some(root) = cli.sysfs_root {
        config = config.sysfs_root(root);
    }

    match cli.command {
        Commands::Alpha { brightness } => {
            println!("{}", brightness_to_alpha(brightness));
        }
        Commands::Table => {
            println!("{}", serde_json::to_string_pretty(&CALIBRATION_TABLE)?);
        }
        Commands::DimAmount => {
            println!("{}", fod_service(&config).dim_amount());
        }
        Commands::Watch { interval_ms } => {
            watch(&config, Duration::from_millis(interval_ms.max(1))).await?;
        }
        Commands::Vibrate { ms } => {
            let mut vibrator = Vibrator::new(config.nodes());
            check_status(vibrator.on(ms))?;
        }
        Commands::Amplitude { amplitude } => {
            let mut vibrator = Vibrator::new(config.nodes());
            check_status(vibrator.set_amplitude(amplitude))?;
        }
        Commands::Effect { name, strength } => {
            let mut vibrator = Vibrator::new(config.nodes());
            let (status, duration_ms) = vibrator.perform(name, strength);
            check_status(status)?;
            println!("{duration_ms}");
        }
        Commands::Off => {
            let mut vibrator = Vibrator::new(config.nodes());
            check_status(vibrator.off())?;
        }
        Commands::Restore { preferences } => {
            if let Some(path) = preferences {
                config = config.preferences_path(path);
            }
            restore(&config)?;
        }
    }

    Ok(())
}

type FodService =
    FingerprintInscreen<SysfsIo, UnavailableDisplayService, UnavailableFingerprintExtensions>;

fn fod_service(config: &HalConfig) -> FodService {
    FingerprintInscreen::new(
        config.nodes(),
        UnavailableDisplayService,
        UnavailableFingerprintExtensions,
        config.fod.clone(),
    )
}

async fn watch(config: &HalConfig, period: Duration) -> Result<()> {
    let fod = fod_service(config);
    let mut ticker = tokio::time::interval(period);
    let mut last = None;

    info!("Watching dim amount every {:?}", period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let amount = fod.dim_amount();
                if last != Some(amount) {
                    info!(dim_amount = amount, "Dim amount changed");
                    last = Some(amount);
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                info!("Stopping");
                return Ok(());
            }
        }
    }
}

fn restore(config: &HalConfig) -> Result<()> {
    let prefs = Preferences::load(&config.preferences_path).with_context(|| {
        format!(
            "failed to load preferences {}",
            config.preferences_path.display()
        )
    })?;

    let startup = Startup::new(config.nodes(), UnavailableDisplayService);
    let report = startup.restore(&prefs);

    if report.start_fps_info_service {
        info!("FPS info overlay requested");
    }
    if !report.is_clean() {
        warn!("{} restore step(s) failed", report.failures.len());
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn check_status(status: Status) -> Result<()> {
    if !status.is_ok() {
        bail!("vibrator returned {status}");
    }
    Ok(())
}
