use std::fs;
use std::path::Path;

use serde::Deserialize;
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::config::ArtifactPaths;
use crate::encode::FeatureSchema;
use crate::error::{ArtifactError, InferenceError};
use crate::types::PredictionResult;

// ---------- Scaler ----------

/// Fitted standard-scaler state exported at training time. Inference only
/// ever applies the transform; there is no fit path.
#[derive(Debug)]
pub struct Scaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

#[derive(Deserialize)]
struct ScalerJson {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl Scaler {
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self, ArtifactError> {
        if mean.len() != scale.len() {
            return Err(ArtifactError::Inconsistent(format!(
                "scaler mean length {} != scale length {}",
                mean.len(),
                scale.len()
            )));
        }
        Ok(Self { mean, scale })
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let txt = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let json: ScalerJson =
            serde_json::from_str(&txt).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(json.mean, json.scale)
    }

    /// Number of columns the scaler was fit over.
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// `(x - mean) / scale`, column-wise. The input must already be aligned
    /// to the training schema.
    pub fn transform(&self, x: &[f32]) -> Result<Vec<f32>, InferenceError> {
        if x.len() != self.mean.len() {
            return Err(InferenceError::LengthMismatch {
                got: x.len(),
                expected: self.mean.len(),
            });
        }
        Ok(x.iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

// ---------- Regressor ----------

/// TorchScript arrival-delay regressor, `[1, N] -> scalar`.
pub struct DelayModel {
    module: CModule,
    device: Device,
}

impl DelayModel {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let device = Device::Cpu;
        let module =
            CModule::load_on_device(path, device).map_err(|source| ArtifactError::Model {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { module, device })
    }

    /// Forward one scaled vector, returning predicted delay in minutes.
    /// No clamping: the regressor may legitimately predict a negative delay.
    pub fn forward(&self, x: &[f32]) -> Result<f64, InferenceError> {
        let input = Tensor::from_slice(x)
            .reshape([1, x.len() as i64])
            .to_device(self.device)
            .to_kind(Kind::Float);
        let out = self.module.forward_ts(&[input])?;
        let sz = out.size();
        if sz.iter().product::<i64>() != 1 {
            return Err(InferenceError::NonScalarOutput(sz));
        }
        Ok(out.reshape([-1i64]).double_value(&[0]))
    }
}

// ---------- Artifact bundle ----------

/// The three load-once artifacts, immutable for the process lifetime.
/// Loaded explicitly at startup and passed by handle — no ambient globals.
pub struct Artifacts {
    pub schema: FeatureSchema,
    pub scaler: Scaler,
    pub model: DelayModel,
}

impl Artifacts {
    /// Load model, scaler, and schema, cross-checking widths and probing the
    /// model with a zeros forward so a broken artifact fails at startup
    /// rather than on the first request.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let schema = FeatureSchema::load(&paths.schema)?;
        if schema.is_empty() {
            return Err(ArtifactError::Inconsistent("schema has no columns".into()));
        }
        let scaler = Scaler::load(&paths.scaler)?;
        if scaler.width() != schema.len() {
            return Err(ArtifactError::Inconsistent(format!(
                "scaler width {} != schema length {}",
                scaler.width(),
                schema.len()
            )));
        }
        let model = DelayModel::load(&paths.model)?;
        model
            .forward(&vec![0.0; schema.len()])
            .map_err(|e| ArtifactError::Inconsistent(format!("probe forward failed: {e}")))?;
        Ok(Self {
            schema,
            scaler,
            model,
        })
    }
}

/// Scale then forward. Classification thresholds the unrounded output.
pub fn predict(artifacts: &Artifacts, vector: &[f32]) -> Result<PredictionResult, InferenceError> {
    let scaled = artifacts.scaler.transform(vector)?;
    let minutes = artifacts.model.forward(&scaled)?;
    Ok(PredictionResult::from_raw(minutes))
}
