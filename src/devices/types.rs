//! Common types for household device classification.

use std::fmt;

use serde::Serialize;

/// Shedding tier of a device.
///
/// Lower levels are more important. Only [`Priority::HighLoad`] devices are
/// eligible for shedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Priority {
    /// Life-safety and security equipment; never shed.
    Critical = 1,
    /// Everyday household equipment; never shed.
    Essential = 2,
    /// Heavy consumers that may be shed under high load.
    HighLoad = 3,
}

impl Priority {
    /// Returns the ordinal tier (1, 2 or 3).
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.level())
    }
}

/// Metadata derived from a device name.
///
/// Produced on demand by [`crate::devices::classify`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    /// Shedding tier.
    pub priority: Priority,
    /// Icon shown next to the device name.
    pub emoji: &'static str,
    /// Human-readable category label.
    pub category: &'static str,
    /// Estimated draw while running (W).
    pub estimated_watts: u32,
}

impl DeviceProfile {
    /// Creates a new profile.
    pub const fn new(
        priority: Priority,
        emoji: &'static str,
        category: &'static str,
        estimated_watts: u32,
    ) -> Self {
        Self {
            priority,
            emoji,
            category,
            estimated_watts,
        }
    }

    /// Returns `true` when this device may be shed under high load.
    pub fn is_sheddable(&self) -> bool {
        self.priority == Priority::HighLoad
    }
}
