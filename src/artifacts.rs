//! On-disk artifacts shared by the build and the predictor.
//!
//! Two files live side by side: the bincode-encoded model parameters and
//! `columns.json`, the feature order the model expects:
//!
//! ```json
//! {
//!   "data_columns": ["total_sqft", "bath", "bhk", "1st block jayanagar"]
//! }
//! ```

use crate::model::{Fitted, InferenceModel, LinearModel, ModelError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MODEL_FILE: &str = "bangalore_home_prices_model.bin";
pub const COLUMNS_FILE: &str = "columns.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found at {}", .0.display())]
    Missing(PathBuf),
    #[error("artifact at {} is unreadable: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the model and its column list are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    model: PathBuf,
    columns: PathBuf,
}

impl ArtifactPaths {
    pub fn new(model: impl Into<PathBuf>, columns: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            columns: columns.into(),
        }
    }

    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(MODEL_FILE), dir.join(COLUMNS_FILE))
    }

    pub fn model(&self) -> &Path {
        &self.model
    }

    pub fn columns(&self) -> &Path {
        &self.columns
    }
}

/// Contents of `columns.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsArtifact {
    pub data_columns: Vec<String>,
}

/// Writes both artifacts, replacing earlier ones. Column names are stored
/// lower-cased.
pub fn write_artifacts(
    paths: &ArtifactPaths,
    model: &LinearModel<Fitted>,
    columns: &[String],
) -> Result<(), ArtifactError> {
    for path in [paths.model(), paths.columns()] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    model.save_to_file(paths.model()).map_err(|e| match e {
        ModelError::Io(io) => ArtifactError::Io(io),
        other => ArtifactError::Corrupt {
            path: paths.model().to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    let artifact = ColumnsArtifact {
        data_columns: columns.iter().map(|c| c.to_lowercase()).collect(),
    };
    let json = serde_json::to_string_pretty(&artifact).map_err(|e| ArtifactError::Corrupt {
        path: paths.columns().to_path_buf(),
        reason: e.to_string(),
    })?;
    std::fs::write(paths.columns(), json)?;

    tracing::info!(
        model = %paths.model().display(),
        columns = %paths.columns().display(),
        n_columns = artifact.data_columns.len(),
        "artifacts written"
    );
    Ok(())
}

pub fn load_model(path: &Path) -> Result<LinearModel<Fitted>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }
    LinearModel::<Fitted>::load_from_file(path).map_err(|e| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn load_columns(path: &Path) -> Result<Vec<String>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }
    let corrupt = |reason: String| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
    let artifact: ColumnsArtifact =
        serde_json::from_str(&text).map_err(|e| corrupt(e.to_string()))?;
    Ok(artifact.data_columns)
}
