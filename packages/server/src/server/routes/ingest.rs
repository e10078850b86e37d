use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::server::app::AppState;

/// Body of the ingestion trigger. `force` is accepted for compatibility;
/// every run already rewrites today's records.
#[derive(Debug, Default, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub force: bool,
}

impl IngestRequest {
    /// Empty or malformed bodies are treated as `{}`.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Run ingestion now and return the aggregate report.
///
/// 200 with the report whenever the run completes, even if every source
/// failed. 500 only when the store cannot be used at all.
///
/// The run is spawned so a dropped connection or the request timeout does
/// not cancel a batch halfway through.
pub async fn ingest_handler(Extension(state): Extension<AppState>, body: Bytes) -> Response {
    let request = IngestRequest::from_body(&body);
    tracing::info!(force = request.force, "Ingestion triggered over HTTP");

    let orchestrator = state.deps.orchestrator();
    let run = tokio::spawn(async move { orchestrator.run().await });

    let result = match run.await {
        Ok(result) => result,
        Err(e) => Err(anyhow::Error::new(e).context("Ingestion task failed")),
    };

    match result {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Ingestion run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                    "details": format!("{:?}", e),
                })),
            )
                .into_response()
        }
    }
}

pub async fn ingest_method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Only POST requests allowed" })),
    )
        .into_response()
}
