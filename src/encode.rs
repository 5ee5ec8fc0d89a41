use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ArtifactError, ValidationError};
use crate::types::FlightQuery;

/// Ordered column list the regressor was trained against. Every encoded
/// vector must match its length and order exactly.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Load the schema artifact: a JSON array of column names.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let txt = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let columns: Vec<String> =
            serde_json::from_str(&txt).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Encode one validated query into the fixed-width vector the model expects.
///
/// The record is expanded to one indicator column per categorical field plus
/// the five numeric columns, then reindexed against `schema`: schema columns
/// absent from the expansion are filled with 0, expanded columns absent from
/// the schema are dropped, and the output order is exactly the schema's.
pub fn encode(query: &FlightQuery, schema: &FeatureSchema) -> Result<Vec<f32>, ValidationError> {
    query.validate()?;
    let record = expand(query);
    Ok(schema
        .columns
        .iter()
        .map(|col| record.get(col.as_str()).copied().unwrap_or(0.0))
        .collect())
}

// One-hot expansion of a single row: exactly one `<field>_<label>` indicator
// per categorical field, numeric fields passed through under their own names.
fn expand(query: &FlightQuery) -> HashMap<String, f32> {
    let mut record = HashMap::with_capacity(10);
    record.insert(
        "day_of_week".to_string(),
        query.day_of_week.model_index() as f32,
    );
    record.insert("month".to_string(), query.month as f32);
    record.insert("hour".to_string(), query.hour as f32);
    record.insert("distance".to_string(), query.distance);
    record.insert(
        "airport_congestion_index".to_string(),
        query.congestion_index,
    );
    record.insert(format!("carrier_name_{}", query.carrier.label()), 1.0);
    record.insert(format!("airport_origin_{}", query.origin.label()), 1.0);
    record.insert(format!("airport_dest_{}", query.destination.label()), 1.0);
    record.insert(format!("weather_condition_{}", query.weather.label()), 1.0);
    record.insert(format!("traffic_level_{}", query.traffic.label()), 1.0);
    record
}
