//! TOML-based dashboard configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::sensor::{SensorBounds, SensorReading, SimulatedSensor};
use crate::session::{DEFAULT_HISTORY_LEN, SEED_DEVICES};

/// Top-level dashboard configuration parsed from TOML.
///
/// All sections have defaults matching the `home` preset. Load from TOML
/// with [`DashboardConfig::from_toml_file`] or use
/// [`DashboardConfig::home`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Load model artifact.
    #[serde(default)]
    pub model: ModelConfig,
    /// Static assets shown alongside the dashboard.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Sensor channel bounds.
    #[serde(default)]
    pub sensors: SensorsConfig,
    /// Session seeding and history length.
    #[serde(default)]
    pub session: SessionConfig,
    /// Simulated sensor drift and refresh pacing.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Load model artifact location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Path to the JSON decision-tree artifact.
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/power_model.json"),
        }
    }
}

/// Optional static assets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Circuit diagram image; a missing file only produces a warning.
    pub image: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image: Some(PathBuf::from("assets/circuit_diagram.png")),
        }
    }
}

/// Voltage and amperage channel bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorsConfig {
    /// Voltage channel (V).
    pub voltage: SensorBounds,
    /// Amperage channel (A).
    pub amperage: SensorBounds,
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            voltage: SensorBounds::VOLTAGE,
            amperage: SensorBounds::AMPERAGE,
        }
    }
}

/// Session seeding and chart length.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Devices tracked when a session starts.
    pub devices: Vec<String>,
    /// Number of power samples kept for the chart (must be > 0).
    pub history_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            devices: SEED_DEVICES.iter().map(ToString::to_string).collect(),
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}

/// Simulated sensor drift and refresh pacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Random seed for the simulated sensor.
    pub seed: u64,
    /// Voltage noise standard deviation (V).
    pub voltage_noise_std: f32,
    /// Amperage noise standard deviation (A).
    pub amperage_noise_std: f32,
    /// Delay between automatic refreshes in the live dashboard (ms).
    pub refresh_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            voltage_noise_std: 2.0,
            amperage_noise_std: 0.5,
            refresh_ms: 1000,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"session.history_len"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl DashboardConfig {
    /// Returns the default household setup.
    pub fn home() -> Self {
        Self {
            model: ModelConfig::default(),
            assets: AssetsConfig::default(),
            sensors: SensorsConfig::default(),
            session: SessionConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// Returns the heatwave preset: climate devices and a heavy draw.
    pub fn heatwave() -> Self {
        Self {
            sensors: SensorsConfig {
                amperage: SensorBounds {
                    default: 22.0,
                    ..SensorBounds::AMPERAGE
                },
                ..SensorsConfig::default()
            },
            session: SessionConfig {
                devices: ["Medical Monitor", "Refrigerator", "Air Conditioner", "Ceiling Fan"]
                    .map(String::from)
                    .to_vec(),
                ..SessionConfig::default()
            },
            simulation: SimulationConfig {
                amperage_noise_std: 1.5,
                ..SimulationConfig::default()
            },
            ..Self::home()
        }
    }

    /// Returns the overnight EV charging preset.
    pub fn ev_night() -> Self {
        Self {
            sensors: SensorsConfig {
                voltage: SensorBounds {
                    default: 225.0,
                    ..SensorBounds::VOLTAGE
                },
                amperage: SensorBounds {
                    default: 26.0,
                    ..SensorBounds::AMPERAGE
                },
            },
            session: SessionConfig {
                devices: ["Security Camera", "Refrigerator", "Tesla Charger", "Water Heater"]
                    .map(String::from)
                    .to_vec(),
                ..SessionConfig::default()
            },
            ..Self::home()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["home", "heatwave", "ev_night"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "home" => Ok(Self::home()),
            "heatwave" => Ok(Self::heatwave()),
            "ev_night" => Ok(Self::ev_night()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.model.path.as_os_str().is_empty() {
            errors.push(ConfigError::new("model.path", "must not be empty"));
        }

        for (name, b) in [
            ("sensors.voltage", &self.sensors.voltage),
            ("sensors.amperage", &self.sensors.amperage),
        ] {
            validate_bounds(name, b, &mut errors);
        }

        if self.session.history_len == 0 {
            errors.push(ConfigError::new("session.history_len", "must be > 0"));
        }
        if self.session.devices.iter().any(String::is_empty) {
            errors.push(ConfigError::new(
                "session.devices",
                "device names must not be empty",
            ));
        }

        let sim = &self.simulation;
        if sim.voltage_noise_std.is_nan() || sim.voltage_noise_std < 0.0 {
            errors.push(ConfigError::new("simulation.voltage_noise_std", "must be >= 0"));
        }
        if sim.amperage_noise_std.is_nan() || sim.amperage_noise_std < 0.0 {
            errors.push(ConfigError::new(
                "simulation.amperage_noise_std",
                "must be >= 0",
            ));
        }
        if sim.refresh_ms == 0 {
            errors.push(ConfigError::new("simulation.refresh_ms", "must be > 0"));
        }

        errors
    }

    /// Default sensor reading for this configuration.
    pub fn default_reading(&self) -> SensorReading {
        SensorReading::defaults(&self.sensors.voltage, &self.sensors.amperage)
    }

    /// Builds the seeded simulated sensor for this configuration.
    ///
    /// Call only on a validated configuration.
    pub fn simulated_sensor(&self) -> SimulatedSensor {
        SimulatedSensor::new(
            self.sensors.voltage,
            self.sensors.amperage,
            self.simulation.voltage_noise_std,
            self.simulation.amperage_noise_std,
            self.simulation.seed,
        )
    }
}

fn validate_bounds(name: &str, b: &SensorBounds, errors: &mut Vec<ConfigError>) {
    if !(b.min.is_finite() && b.max.is_finite()) || b.min >= b.max {
        errors.push(ConfigError::new(
            format!("{name}.min"),
            format!("must be finite and < {name}.max"),
        ));
    } else if !(b.min..=b.max).contains(&b.default) {
        errors.push(ConfigError::new(
            format!("{name}.default"),
            format!("must be in [{}, {}]", b.min, b.max),
        ));
    }
    if b.step.is_nan() || b.step <= 0.0 {
        errors.push(ConfigError::new(format!("{name}.step"), "must be > 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_preset_valid() {
        let cfg = DashboardConfig::home();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "home should be valid: {errors:?}");
    }

    #[test]
    fn home_matches_session_defaults() {
        let cfg = DashboardConfig::home();
        assert_eq!(cfg.session.devices, SEED_DEVICES);
        assert_eq!(cfg.session.history_len, 20);
        assert_eq!(cfg.default_reading(), SensorReading::new(230.0, 5.0));
    }

    #[test]
    fn from_preset_unknown() {
        let err = DashboardConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in DashboardConfig::PRESETS {
            let cfg = DashboardConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn heatwave_draws_more_than_home() {
        let home = DashboardConfig::home();
        let hot = DashboardConfig::heatwave();
        assert!(hot.default_reading().power_w() > home.default_reading().power_w());
        assert!(hot.session.devices.iter().any(|d| d == "Ceiling Fan"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[model]
path = "custom/model.json"

[assets]
image = "docs/diagram.png"

[sensors.voltage]
min = 100.0
max = 130.0
default = 120.0
step = 0.5

[sensors.amperage]
min = 0.0
max = 50.0
default = 10.0
step = 1.0

[session]
devices = ["Heart Monitor", "Oven"]
history_len = 40

[simulation]
seed = 7
voltage_noise_std = 1.0
amperage_noise_std = 0.2
refresh_ms = 250
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.session.history_len), Some(40));
        assert_eq!(cfg.as_ref().map(|c| c.sensors.voltage.max), Some(130.0));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.assets.image.clone()),
            Some(PathBuf::from("docs/diagram.png"))
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 99
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.seed), Some(99));
        assert_eq!(cfg.as_ref().map(|c| c.simulation.refresh_ms), Some(1000));
        assert_eq!(cfg.as_ref().map(|c| c.sensors.amperage.max), Some(30.0));
        assert_eq!(cfg.as_ref().map(|c| c.session.devices.len()), Some(3));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[session]
history_len = 20
bogus_field = true
"#;
        assert!(DashboardConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_sensor_table_is_rejected() {
        let toml = r#"
[sensors.voltage]
min = 100.0
"#;
        assert!(DashboardConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_zero_history() {
        let mut cfg = DashboardConfig::home();
        cfg.session.history_len = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "session.history_len"));
    }

    #[test]
    fn validation_catches_inverted_bounds() {
        let mut cfg = DashboardConfig::home();
        cfg.sensors.voltage.min = 300.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "sensors.voltage.min"));
    }

    #[test]
    fn validation_catches_default_out_of_range() {
        let mut cfg = DashboardConfig::home();
        cfg.sensors.amperage.default = 31.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "sensors.amperage.default"));
    }

    #[test]
    fn validation_catches_negative_noise_and_zero_refresh() {
        let mut cfg = DashboardConfig::home();
        cfg.simulation.voltage_noise_std = -1.0;
        cfg.simulation.refresh_ms = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.voltage_noise_std"));
        assert!(errors.iter().any(|e| e.field == "simulation.refresh_ms"));
    }

    #[test]
    fn validation_catches_empty_seed_name() {
        let mut cfg = DashboardConfig::home();
        cfg.session.devices.push(String::new());
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "session.devices"));
    }

    #[test]
    fn error_display_includes_field() {
        let e = ConfigError::new("session.history_len", "must be > 0");
        assert_eq!(e.to_string(), "config error: session.history_len: must be > 0");
    }
}
