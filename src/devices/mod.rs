//! Household device classification.

/// Ordered name-to-profile lookup table.
pub mod intel;
pub mod types;

// Re-export the main types for convenience
pub use intel::{DEFAULT_PROFILE, classify, device_intel};
pub use types::DeviceProfile;
pub use types::Priority;
