//! Load labels and per-refresh grid status records.

use std::fmt;

use serde::Serialize;

use crate::devices::DeviceProfile;
use crate::sensor::SensorReading;

/// Classifier output describing current load severity.
///
/// The label is opaque apart from one value: [`LoadPrediction::HIGH`]
/// triggers shedding, everything else does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LoadPrediction(String);

impl LoadPrediction {
    /// Label that triggers shedding.
    pub const HIGH: &'static str = "High";

    /// Wraps a classifier label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Shorthand for the shedding label.
    pub fn high() -> Self {
        Self::new(Self::HIGH)
    }

    /// Returns `true` when this label triggers shedding.
    pub fn is_high(&self) -> bool {
        self.0 == Self::HIGH
    }

    /// Returns the raw label.
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoadPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decision for one tracked device in one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceStatus {
    /// Device name as entered.
    pub name: String,
    /// Classified profile.
    pub profile: DeviceProfile,
    /// `false` when the device is shed.
    pub active: bool,
}

/// Complete result of one refresh pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSnapshot {
    /// Sensor reading used for this pass.
    pub reading: SensorReading,
    /// Live power draw (W).
    pub power_w: f32,
    /// Classifier output for `reading`.
    pub prediction: LoadPrediction,
    /// Estimated power saved by shedding (W).
    pub saved_w: u32,
    /// Per-device decisions in tracking order.
    pub devices: Vec<DeviceStatus>,
}

impl GridSnapshot {
    /// Number of devices shed in this pass.
    pub fn shed_count(&self) -> usize {
        self.devices.iter().filter(|d| !d.active).count()
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V={:>6.1} V  I={:>5.2} A | power={:>8.1} W | status={} LOAD | \
             saved={} W | shed={}/{}",
            self.reading.voltage,
            self.reading.amperage,
            self.power_w,
            self.prediction,
            self.saved_w,
            self.shed_count(),
            self.devices.len(),
        )
    }
}
