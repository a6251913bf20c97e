//! Simulated voltage and amperage inputs.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Range, default and adjustment step of one sensor channel.
///
/// Deserialized tables must give all four fields.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SensorBounds {
    /// Lowest accepted value.
    pub min: f32,
    /// Highest accepted value.
    pub max: f32,
    /// Value used when no reading is supplied.
    pub default: f32,
    /// Increment applied by one nudge.
    pub step: f32,
}

impl SensorBounds {
    /// Default voltage channel: 200–260 V, 230 V nominal.
    pub const VOLTAGE: Self = Self {
        min: 200.0,
        max: 260.0,
        default: 230.0,
        step: 1.0,
    };

    /// Default amperage channel: 0–30 A, 5 A nominal.
    pub const AMPERAGE: Self = Self {
        min: 0.0,
        max: 30.0,
        default: 5.0,
        step: 0.5,
    };

    /// Clamps `value` into `[min, max]`. NaN maps to `default`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }
}

/// One voltage/amperage sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    /// Line voltage (V).
    pub voltage: f32,
    /// Current draw (A).
    pub amperage: f32,
}

impl SensorReading {
    /// Creates a new reading.
    pub fn new(voltage: f32, amperage: f32) -> Self {
        Self { voltage, amperage }
    }

    /// Returns the default reading for the given channels.
    pub fn defaults(voltage: &SensorBounds, amperage: &SensorBounds) -> Self {
        Self::new(voltage.default, amperage.default)
    }

    /// Returns a copy with both channels clamped to their bounds.
    pub fn clamped(self, voltage: &SensorBounds, amperage: &SensorBounds) -> Self {
        Self::new(voltage.clamp(self.voltage), amperage.clamp(self.amperage))
    }

    /// Apparent power draw (W).
    pub fn power_w(&self) -> f32 {
        self.voltage * self.amperage
    }

    /// Moves voltage by `steps` increments, staying within bounds.
    pub fn nudge_voltage(&mut self, bounds: &SensorBounds, steps: f32) {
        self.voltage = bounds.clamp(self.voltage + steps * bounds.step);
    }

    /// Moves amperage by `steps` increments, staying within bounds.
    pub fn nudge_amperage(&mut self, bounds: &SensorBounds, steps: f32) {
        self.amperage = bounds.clamp(self.amperage + steps * bounds.step);
    }
}

/// Noisy sensor that jitters readings around a set point.
///
/// Each [`sample`](Self::sample) draws independent Gaussian noise on both
/// channels and clamps the result. Identical seeds give identical sequences.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    voltage: SensorBounds,
    amperage: SensorBounds,
    voltage_noise_std: f32,
    amperage_noise_std: f32,
    rng: StdRng,
}

impl SimulatedSensor {
    /// Creates a seeded simulated sensor.
    ///
    /// # Panics
    ///
    /// Panics if either noise standard deviation is negative.
    pub fn new(
        voltage: SensorBounds,
        amperage: SensorBounds,
        voltage_noise_std: f32,
        amperage_noise_std: f32,
        seed: u64,
    ) -> Self {
        assert!(voltage_noise_std >= 0.0, "voltage noise must be >= 0");
        assert!(amperage_noise_std >= 0.0, "amperage noise must be >= 0");
        Self {
            voltage,
            amperage,
            voltage_noise_std,
            amperage_noise_std,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a noisy reading around `set_point`, clamped to bounds.
    pub fn sample(&mut self, set_point: SensorReading) -> SensorReading {
        let dv = gaussian_noise(&mut self.rng, self.voltage_noise_std);
        let da = gaussian_noise(&mut self.rng, self.amperage_noise_std);
        SensorReading::new(set_point.voltage + dv, set_point.amperage + da)
            .clamped(&self.voltage, &self.amperage)
    }
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f32) -> f32 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f32 = rng.random::<f32>().clamp(1e-6, 1.0);
    let u2: f32 = rng.random::<f32>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
    z0 * std_dev
}
