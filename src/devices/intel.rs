//! Name-based device intel lookup.
//!
//! Device names are matched against an ordered table of lowercase keys. The
//! first key that appears anywhere in the lowercased name wins, so table
//! order is part of the contract: `"tesla charger"` resolves through
//! `"charger"` because that entry precedes `"tesla"`.

use super::types::{DeviceProfile, Priority};

const CRITICAL: &str = "Critical";
const ESSENTIAL: &str = "Essential";
const HIGH_LOAD: &str = "High Load";

/// Ordered `(key, profile)` table. Do not sort.
const DEVICE_INTEL: &[(&str, DeviceProfile)] = &[
    ("heart", DeviceProfile::new(Priority::Critical, "❤️", CRITICAL, 50)),
    ("medical", DeviceProfile::new(Priority::Critical, "🏥", CRITICAL, 100)),
    ("monitor", DeviceProfile::new(Priority::Critical, "🖥️", CRITICAL, 60)),
    ("security", DeviceProfile::new(Priority::Critical, "🛡️", CRITICAL, 40)),
    ("fridge", DeviceProfile::new(Priority::Essential, "❄️", ESSENTIAL, 150)),
    ("refrigerator", DeviceProfile::new(Priority::Essential, "🧊", ESSENTIAL, 200)),
    ("light", DeviceProfile::new(Priority::Essential, "💡", ESSENTIAL, 15)),
    ("wifi", DeviceProfile::new(Priority::Essential, "🌐", ESSENTIAL, 20)),
    ("fan", DeviceProfile::new(Priority::Essential, "🌀", ESSENTIAL, 75)),
    ("ac", DeviceProfile::new(Priority::HighLoad, "🌬️", HIGH_LOAD, 1500)),
    ("conditioner", DeviceProfile::new(Priority::HighLoad, "❄️", HIGH_LOAD, 2000)),
    ("charger", DeviceProfile::new(Priority::HighLoad, "🔌", HIGH_LOAD, 3000)),
    ("tesla", DeviceProfile::new(Priority::HighLoad, "🚗", HIGH_LOAD, 7000)),
    ("ev", DeviceProfile::new(Priority::HighLoad, "⚡", HIGH_LOAD, 5000)),
    ("heater", DeviceProfile::new(Priority::HighLoad, "🔥", HIGH_LOAD, 1500)),
    ("oven", DeviceProfile::new(Priority::HighLoad, "🥧", HIGH_LOAD, 2000)),
];

/// Profile returned when no table key matches.
pub const DEFAULT_PROFILE: DeviceProfile =
    DeviceProfile::new(Priority::HighLoad, "🔌", "General", 500);

/// Returns the ordered intel table.
pub fn device_intel() -> &'static [(&'static str, DeviceProfile)] {
    DEVICE_INTEL
}

/// Classifies a free-text device name.
///
/// Matching is case-insensitive and substring-based; the first table entry
/// whose key occurs in the name is returned, or [`DEFAULT_PROFILE`] when
/// nothing matches.
///
/// # Examples
///
/// ```
/// use gridshed::devices::{Priority, classify};
///
/// let profile = classify("Kitchen Oven");
/// assert_eq!(profile.priority, Priority::HighLoad);
/// assert_eq!(profile.estimated_watts, 2000);
/// ```
pub fn classify(name: &str) -> DeviceProfile {
    let normalized = name.to_lowercase();
    DEVICE_INTEL
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map_or(DEFAULT_PROFILE, |&(_, profile)| profile)
}
