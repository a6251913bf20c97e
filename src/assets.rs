//! Optional static assets shown next to the dashboard.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Outcome of probing an optional asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    /// No asset configured.
    Disabled,
    /// File exists.
    Found(PathBuf),
    /// File is configured but absent; rendered as an inline warning.
    Missing(PathBuf),
}

impl AssetStatus {
    /// Short line for the dashboard sidebar.
    pub fn describe(&self) -> String {
        match self {
            Self::Disabled => "No circuit diagram configured".to_string(),
            Self::Found(path) => format!("Circuit diagram: {}", path.display()),
            Self::Missing(path) => format!(
                "Could not find '{}'. Check your project folder!",
                path.display()
            ),
        }
    }

    /// Returns `true` for [`AssetStatus::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// Checks whether the configured image exists. Never fails.
pub fn probe_image(path: Option<&Path>) -> AssetStatus {
    let Some(path) = path else {
        return AssetStatus::Disabled;
    };
    if path.is_file() {
        AssetStatus::Found(path.to_path_buf())
    } else {
        warn!(path = %path.display(), "image asset not found");
        AssetStatus::Missing(path.to_path_buf())
    }
}
