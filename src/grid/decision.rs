//! Load-shedding policy.
//!
//! Under a high-load prediction every [`Priority::HighLoad`] device is shed;
//! otherwise everything stays on. All functions here are pure.

use tracing::debug;

use crate::devices::{Priority, classify};
use crate::sensor::SensorReading;

use super::types::{DeviceStatus, GridSnapshot, LoadPrediction};

/// Returns `false` (shed) iff the load is high and the device is high-load.
pub fn is_active(prediction: &LoadPrediction, priority: Priority) -> bool {
    !(prediction.is_high() && priority == Priority::HighLoad)
}

/// Sums the estimated wattage of every device that would be shed.
///
/// # Examples
///
/// ```
/// use gridshed::grid::{LoadPrediction, estimate_savings};
///
/// let high = LoadPrediction::high();
/// assert_eq!(estimate_savings(&high, ["Oven", "Desk Light"]), 2000);
/// assert_eq!(estimate_savings(&LoadPrediction::new("Low"), ["Oven"]), 0);
/// ```
pub fn estimate_savings<I, S>(prediction: &LoadPrediction, devices: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    devices
        .into_iter()
        .map(|name| classify(name.as_ref()))
        .filter(|profile| !is_active(prediction, profile.priority))
        .map(|profile| profile.estimated_watts)
        .sum()
}

/// Runs one decision pass over `devices` for the given reading.
pub fn evaluate<I, S>(prediction: LoadPrediction, reading: SensorReading, devices: I) -> GridSnapshot
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut saved_w = 0;
    let statuses: Vec<DeviceStatus> = devices
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let profile = classify(name);
            let active = is_active(&prediction, profile.priority);
            if !active {
                debug!(device = name, watts = profile.estimated_watts, "shedding device");
                saved_w += profile.estimated_watts;
            }
            DeviceStatus {
                name: name.to_string(),
                profile,
                active,
            }
        })
        .collect();

    GridSnapshot {
        reading,
        power_w: reading.power_w(),
        prediction,
        saved_w,
        devices: statuses,
    }
}
