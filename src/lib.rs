//! Home smart-grid load balancer: device intel, load shedding and a live
//! dashboard over simulated sensors.

/// Optional static assets.
pub mod assets;
pub mod cli;
pub mod config;
pub mod devices;
/// Load decision policy and per-refresh snapshots.
pub mod grid;
pub mod io;
pub mod logging;
/// Load classifier contract and model artifact.
pub mod model;
pub mod sensor;
pub mod session;
/// Live terminal dashboard.
#[cfg(feature = "tui")]
pub mod tui;
