use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Html;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use super::error::HttpApiError;
use super::state::AppState;
use crate::catalog::{CategoryListing, NotFound};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Serialize)]
pub(super) struct RandomEventResponse {
    event: String,
    outcome: String,
}

#[derive(Debug, Serialize)]
pub(super) struct OutcomeResponse {
    outcome: String,
}

pub(super) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn list_categories(State(state): State<AppState>) -> Json<CategoryListing> {
    Json(state.catalog().list_categories())
}

pub(super) async fn random_event(
    State(state): State<AppState>,
    uri: Uri,
    category: Result<Path<String>, PathRejection>,
) -> Result<Json<RandomEventResponse>, HttpApiError> {
    let Path(category) = category.map_err(|rejection| {
        tracing::debug!(%rejection, "undecodable category");
        NotFound::Category(raw_key(&uri))
    })?;
    let draw = state
        .rng()
        .with_rng(|rng| state.catalog().random_event(&category, rng))?;
    tracing::debug!(
        category = %category,
        event = %draw.event,
        severity = %draw.severity,
        "drew event"
    );

    Ok(Json(RandomEventResponse {
        event: draw.event,
        outcome: draw.outcome,
    }))
}

pub(super) async fn random_outcome(
    State(state): State<AppState>,
    uri: Uri,
    severity: Result<Path<String>, PathRejection>,
) -> Result<Json<OutcomeResponse>, HttpApiError> {
    let Path(severity) = severity.map_err(|rejection| {
        tracing::debug!(%rejection, "undecodable severity");
        NotFound::Severity(raw_key(&uri))
    })?;
    let outcome = state.rng().with_rng(|rng| {
        state
            .catalog()
            .random_outcome(&severity, rng)
            .map(str::to_string)
    })?;
    tracing::debug!(severity = %severity, "drew outcome");

    Ok(Json(OutcomeResponse { outcome }))
}

/// Last path segment, still percent-encoded. A segment that does not decode
/// to UTF-8 cannot name a catalog key, so it is reported as missing.
fn raw_key(uri: &Uri) -> String {
    uri.path().rsplit('/').next().unwrap_or_default().to_string()
}
