//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Command;

use gridshed::config::DashboardConfig;
use gridshed::model::TreeModel;
use gridshed::sensor::SensorReading;

/// Absolute path to a file shipped with the crate.
pub fn repo_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(rel)
}

/// Bundled decision-tree model (High above 20 A when voltage > 205 V).
pub fn bundled_model() -> TreeModel {
    TreeModel::load(&repo_path("models/power_model.json")).expect("bundled model should load")
}

/// `home` preset with the bundled model path made absolute.
pub fn home_config() -> DashboardConfig {
    let mut cfg = DashboardConfig::home();
    cfg.model.path = repo_path("models/power_model.json");
    cfg.assets.image = None;
    cfg
}

/// Reading that the bundled model classifies as High.
pub fn high_reading() -> SensorReading {
    SensorReading::new(230.0, 25.0)
}

/// Reading that the bundled model classifies as Low.
pub fn low_reading() -> SensorReading {
    SensorReading::new(230.0, 5.0)
}

/// `gridshed` binary command running from the crate root with logs silenced.
pub fn gridshed() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gridshed"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("RUST_LOG", "off");
    cmd
}
