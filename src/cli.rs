//! Command-line options and config resolution.

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::config::{ConfigError, DashboardConfig};
use crate::sensor::SensorReading;

/// Preset used when neither `--config` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "home";

/// Smart grid load balancer dashboard.
#[derive(Debug, Parser)]
#[command(name = "gridshed", version)]
pub struct CliOptions {
    /// Load configuration from a TOML file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Use a built-in preset (home, heatwave, ev_night).
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the model artifact path.
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Override the circuit diagram image path.
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Initial voltage reading (V); clamped to the configured range.
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    pub voltage: Option<f32>,

    /// Initial amperage reading (A); clamped to the configured range.
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    pub amperage: Option<f32>,

    /// Start tracking a device (repeatable).
    #[arg(long = "add", value_name = "NAME")]
    pub add: Vec<String>,

    /// Stop tracking a device (repeatable).
    #[arg(long = "remove", value_name = "NAME")]
    pub remove: Vec<String>,

    /// Number of refresh cycles to run headless; cycles after the first
    /// read the simulated sensor.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub cycles: u32,

    /// Override the simulated sensor seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print one JSON snapshot per cycle instead of text.
    #[arg(long)]
    pub json: bool,

    /// Export the power history to CSV after the run.
    #[arg(long, value_name = "PATH")]
    pub history_out: Option<PathBuf>,

    /// Write logs to a file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Launch the live terminal dashboard.
    #[cfg(feature = "tui")]
    #[arg(long)]
    pub tui: bool,
}

/// Parses a sensor value, rejecting NaN and infinities.
fn parse_finite(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("expected a finite number, got {s}"))
    }
}

impl CliOptions {
    /// Name of the preset in effect, or `None` when a config file is used.
    pub fn preset_name(&self) -> Option<&str> {
        if self.config.is_some() {
            None
        } else {
            Some(self.preset.as_deref().unwrap_or(DEFAULT_PRESET))
        }
    }

    /// Resolves and validates the configuration, applying CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns every problem found: load failures yield a single error,
    /// validation may yield several.
    pub fn load_config(&self) -> Result<DashboardConfig, Vec<ConfigError>> {
        let mut cfg = match (&self.config, self.preset_name()) {
            (Some(path), _) => DashboardConfig::from_toml_file(path),
            (None, Some(name)) => DashboardConfig::from_preset(name),
            (None, None) => Ok(DashboardConfig::home()),
        }
        .map_err(|e| vec![e])?;

        if let Some(path) = &self.model {
            cfg.model.path = path.clone();
        }
        if let Some(path) = &self.image {
            cfg.assets.image = Some(path.clone());
        }
        if let Some(seed) = self.seed {
            cfg.simulation.seed = seed;
        }

        let errors = cfg.validate();
        if errors.is_empty() {
            Ok(cfg)
        } else {
            Err(errors)
        }
    }

    /// Initial reading: CLI values over config defaults, clamped to bounds.
    pub fn initial_reading(&self, cfg: &DashboardConfig) -> SensorReading {
        let defaults = cfg.default_reading();
        let requested = SensorReading::new(
            self.voltage.unwrap_or(defaults.voltage),
            self.amperage.unwrap_or(defaults.amperage),
        );
        let reading = requested.clamped(&cfg.sensors.voltage, &cfg.sensors.amperage);
        if reading != requested {
            warn!(
                voltage = reading.voltage,
                amperage = reading.amperage,
                "sensor input clamped to configured range"
            );
        }
        reading
    }
}
