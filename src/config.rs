use std::env;
use std::path::PathBuf;

use crate::error::ArtifactError;

/// Locations of the three training-time artifacts. The only configuration
/// the pipeline needs.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub schema: PathBuf,
}

impl ArtifactPaths {
    /// Resolve from `MODEL_PATH`, `SCALER_PATH`, and `SCHEMA_PATH`.
    pub fn from_env() -> Result<Self, ArtifactError> {
        Ok(Self {
            model: require("MODEL_PATH")?,
            scaler: require("SCALER_PATH")?,
            schema: require("SCHEMA_PATH")?,
        })
    }
}

fn require(var: &'static str) -> Result<PathBuf, ArtifactError> {
    env::var_os(var)
        .map(PathBuf::from)
        .ok_or(ArtifactError::MissingPath { var })
}
