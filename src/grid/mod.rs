//! Load decision: which devices stay on and what shedding saves.

/// Shedding policy and refresh evaluation.
pub mod decision;
pub mod types;

pub use decision::{estimate_savings, evaluate, is_active};
pub use types::{DeviceStatus, GridSnapshot, LoadPrediction};
