//! Decision-tree load model loaded from a JSON artifact.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "labels": ["Low", "High"],
//!   "nodes": [
//!     { "split": { "feature": 1, "threshold": 12.0, "left": 1, "right": 2 } },
//!     { "leaf": { "label": "Low" } },
//!     { "leaf": { "label": "High" } }
//!   ]
//! }
//! ```
//!
//! `labels` is optional; when present it must list every leaf label.
//! Feature 0 is voltage, feature 1 is amperage. Traversal starts at node 0
//! and goes `left` when the feature value is `<= threshold`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{LoadPredictor, ModelError};
use crate::grid::LoadPrediction;

/// Number of input features (`[voltage, amperage]`).
pub const FEATURE_COUNT: usize = 2;

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Node {
    /// Internal comparison node.
    Split {
        /// Feature index into `[voltage, amperage]`.
        feature: usize,
        /// Comparison threshold.
        threshold: f32,
        /// Child taken when `value <= threshold`.
        left: usize,
        /// Child taken otherwise.
        right: usize,
    },
    /// Terminal node carrying the predicted label.
    Leaf {
        /// Load label.
        label: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Artifact {
    #[serde(default)]
    labels: Option<Vec<String>>,
    nodes: Vec<Node>,
}

/// Validated decision tree.
///
/// Children always have larger indices than their parent, so prediction
/// terminates in at most `nodes.len()` hops.
#[derive(Debug, Clone)]
pub struct TreeModel {
    nodes: Vec<Node>,
}

impl TreeModel {
    /// Builds a tree from nodes, validating its structure.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Invalid`] if the tree is empty, references a
    /// missing or earlier node, uses an unknown feature, or has an empty
    /// leaf label.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::Invalid("tree has no nodes".into()));
        }
        for (idx, node) in nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelError::Invalid(format!(
                            "node {idx}: feature {feature} out of range (expected < {FEATURE_COUNT})"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "node {idx}: threshold must be finite"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= nodes.len() {
                            return Err(ModelError::Invalid(format!(
                                "node {idx}: child {child} must be in {}..{}",
                                idx + 1,
                                nodes.len()
                            )));
                        }
                    }
                }
                Node::Leaf { label } => {
                    if label.is_empty() {
                        return Err(ModelError::Invalid(format!("node {idx}: empty label")));
                    }
                }
            }
        }
        Ok(Self { nodes })
    }

    /// Parses and validates a tree from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] for malformed JSON or
    /// [`ModelError::Invalid`] for a structurally broken tree or a leaf
    /// label missing from the declared `labels`.
    pub fn from_json_str(s: &str) -> Result<Self, ModelError> {
        let artifact: Artifact = serde_json::from_str(s)?;
        let model = Self::from_nodes(artifact.nodes)?;
        if let Some(declared) = &artifact.labels {
            if let Some(missing) = model
                .labels()
                .into_iter()
                .find(|label| !declared.iter().any(|d| d == *label))
            {
                return Err(ModelError::Invalid(format!(
                    "leaf label \"{missing}\" is not declared in labels"
                )));
            }
        }
        Ok(model)
    }

    /// Loads the model artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Read`] if the file cannot be read, otherwise as
    /// [`TreeModel::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            nodes = model.nodes.len(),
            "loaded load model"
        );
        Ok(model)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a validated tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Distinct leaf labels in node order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if let Node::Leaf { label } = node {
                if !labels.contains(&label.as_str()) {
                    labels.push(label);
                }
            }
        }
        labels
    }
}

impl LoadPredictor for TreeModel {
    fn predict(&self, voltage: f32, amperage: f32) -> LoadPrediction {
        let features = [voltage, amperage];
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { label } => return LoadPrediction::new(label.as_str()),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}
