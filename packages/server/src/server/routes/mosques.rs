//! Read-only endpoints for the map and detail views.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::MosqueId;
use crate::domains::mosques::Mosque;
use crate::domains::prayer_times::PrayerTimeRecord;
use crate::server::app::AppState;

type ApiError = (StatusCode, Json<Value>);

fn internal_error(e: anyhow::Error) -> ApiError {
    tracing::error!(error = %e, "Store read failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_mosques_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Mosque>>, ApiError> {
    let mosques = state
        .deps
        .store
        .list_mosques()
        .await
        .map_err(internal_error)?;
    Ok(Json(mosques))
}

#[derive(Debug, Deserialize)]
pub struct PrayerTimesQuery {
    /// Defaults to today (UTC)
    pub date: Option<NaiveDate>,
}

pub async fn mosque_prayer_times_handler(
    Extension(state): Extension<AppState>,
    Path(mosque_id): Path<MosqueId>,
    Query(query): Query<PrayerTimesQuery>,
) -> Result<Json<PrayerTimeRecord>, ApiError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    match state
        .deps
        .store
        .find_prayer_times(mosque_id, date)
        .await
        .map_err(internal_error)?
    {
        Some(record) => Ok(Json(record)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No prayer times for mosque {} on {}", mosque_id, date)
            })),
        )),
    }
}
