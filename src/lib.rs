//! Flight arrival-delay prediction pipeline.
//!
//! Turns a structured flight description into the fixed-width feature vector
//! a pre-trained regressor expects, runs inference, and classifies the
//! predicted delay as on-time or delayed:
//!
//! ```text
//! FlightQuery → encode (one-hot + schema reindex) → scale → forward → PredictionResult
//! ```
//!
//! The model, scaler, and feature schema are opaque training-time artifacts,
//! loaded once at startup via [`Artifacts::load`] and passed by handle. Every
//! step after loading is a pure function of its inputs, so predictions may
//! run concurrently without locking.

pub mod config;
pub mod encode;
pub mod error;
pub mod model;
pub mod types;

pub use config::ArtifactPaths;
pub use encode::{encode, FeatureSchema};
pub use error::{ArtifactError, InferenceError, PredictError, ValidationError};
pub use model::{predict, Artifacts, DelayModel, Scaler};
pub use types::{
    Airport, Carrier, DayOfWeek, DelayClass, FlightQuery, PredictionResult, Traffic, Weather,
    ON_TIME_THRESHOLD_MIN,
};

/// Encode a query against the loaded schema and run it through the model.
/// The one operation the serving layer consumes.
pub fn predict_delay(
    artifacts: &Artifacts,
    query: &FlightQuery,
) -> Result<PredictionResult, PredictError> {
    let vector = encode::encode(query, &artifacts.schema)?;
    Ok(model::predict(artifacts, &vector)?)
}
