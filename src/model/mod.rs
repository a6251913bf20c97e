//! Load classifier contract and the on-disk model artifact.
//!
//! The dashboard only ever calls [`LoadPredictor::predict`]; training and
//! feature engineering live elsewhere.

/// JSON decision-tree artifact.
pub mod tree;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::LoadPrediction;

pub use tree::TreeModel;

/// Maps a sensor reading to a load label.
pub trait LoadPredictor {
    /// Predicts the load label for `[voltage, amperage]`.
    fn predict(&self, voltage: f32, amperage: f32) -> LoadPrediction;
}

impl<F> LoadPredictor for F
where
    F: Fn(f32, f32) -> LoadPrediction,
{
    fn predict(&self, voltage: f32, amperage: f32) -> LoadPrediction {
        self(voltage, amperage)
    }
}

/// Failure to obtain a usable model. Always fatal for the dashboard.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("cannot read model \"{}\": {source}", .path.display())]
    Read {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The artifact is not valid JSON for the expected layout.
    #[error("invalid model JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The artifact parsed but describes a broken tree.
    #[error("invalid model: {0}")]
    Invalid(String),
}
