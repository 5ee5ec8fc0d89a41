use axum::{extract::State, http::StatusCode, routing::post, Json};
use serde_json::json;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use delay_predictor::{encode, predict, ArtifactPaths, Artifacts, FlightQuery};

// ---------- Response type ----------

#[derive(serde::Serialize)]
struct PredictionOut {
    ts_ms: i64,
    delay_minutes: f64,
    delay_class: &'static str,
}

// ---------- Server state ----------

#[derive(Clone)]
struct AppState {
    artifacts: Arc<Artifacts>,
}

// ---------- Handler ----------

async fn predict_route(
    State(state): State<AppState>,
    Json(query): Json<FlightQuery>,
) -> Result<Json<PredictionOut>, (StatusCode, Json<serde_json::Value>)> {
    // Validation failures are the caller's problem; report and stop.
    let vector = encode(&query, &state.artifacts.schema)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": e.to_string() }))))?;

    // Debug signal so we can confirm we're not sending all-zeros
    if tracing::enabled!(tracing::Level::DEBUG) {
        let nz = vector.iter().filter(|x| **x != 0.0).count();
        let mean = if vector.is_empty() {
            0.0
        } else {
            vector.iter().sum::<f32>() / (vector.len() as f32)
        };
        let mut sample = vec![];
        for (i, name) in state.artifacts.schema.columns().iter().take(6).enumerate() {
            sample.push(format!("{}={:.3}", name, vector[i]));
        }
        tracing::debug!(
            "recv {}->{} carrier={} in_dim={} nonzero={} mean={:.3} sample=[{}]",
            query.origin.code(),
            query.destination.code(),
            query.carrier.label(),
            vector.len(),
            nz,
            mean,
            sample.join(", ")
        );
    }

    // Contract violations past encoding are fatal to the request, not retried.
    let result = predict(&state.artifacts, &vector)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() }))))?;

    let now_ms = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as i64;
    Ok(Json(PredictionOut {
        ts_ms: now_ms,
        delay_minutes: result.display_minutes(),
        delay_class: result.delay_class.label(),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let paths = ArtifactPaths::from_env()?;
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // Loading probes the model with a zeros forward, which doubles as warmup.
    let artifacts = Artifacts::load(&paths)?;
    tracing::info!(
        "loaded artifacts; schema[{}] head: {:?}",
        artifacts.schema.len(),
        &artifacts.schema.columns()[..artifacts.schema.len().min(6)]
    );

    let state = AppState {
        artifacts: Arc::new(artifacts),
    };

    let app = axum::Router::new()
        .route("/predict", post(predict_route))
        .with_state(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
