use std::path::PathBuf;

use thiserror::Error;

use crate::types::Airport;

/// Startup failures: an artifact could not be resolved, loaded, or the
/// loaded set is mutually inconsistent. Fatal — no prediction can be
/// served without all three artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{var} not set")]
    MissingPath { var: &'static str },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load TorchScript module {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: tch::TchError,
    },
    #[error("artifact mismatch: {0}")]
    Inconsistent(String),
}

/// Caller-supplied query violates a domain constraint. Recoverable:
/// reported back, nothing is encoded or predicted.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("origin and destination are the same airport ({})", .0.code())]
    SameAirport(Airport),
    #[error("{field} = {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Contract violation between the encoded vector and the loaded artifacts.
/// Should never occur if the encoder's reindex invariant holds; never
/// retried, since the pipeline is deterministic.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("feature length mismatch: got {got}, expected {expected}")]
    LengthMismatch { got: usize, expected: usize },
    #[error("model forward failed: {0}")]
    Forward(#[from] tch::TchError),
    #[error("expected scalar model output, got shape {0:?}")]
    NonScalarOutput(Vec<i64>),
}

/// Per-request failure surfaced by [`crate::predict_delay`].
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
