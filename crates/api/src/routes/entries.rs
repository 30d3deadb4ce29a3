//! Journal entry routes.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use database::Entry;
use serde::{Deserialize, Serialize};
use tracker_core::Dimension;

use crate::auth::identity;
use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DimensionQuery {
    pub dimension: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub dimension: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedEntry {
    pub created_at: i64,
}

/// `GET /api/entries?dimension=` - the caller's latest entries in one dimension.
pub async fn list_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DimensionQuery>,
) -> Result<Json<Vec<Entry>>> {
    let dimension: Dimension = query.dimension.parse()?;
    let entries = state
        .journal
        .entries_by_dimension(identity(&headers), dimension)
        .await?;
    Ok(Json(entries))
}

pub async fn create_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CreatedEntry>)> {
    let created_at = state
        .journal
        .create_entry(identity(&headers), &request.dimension, &request.content)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedEntry { created_at })))
}

pub async fn get_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Entry>> {
    state
        .journal
        .get_entry(identity(&headers), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Entry not found: {}", id)))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.journal.delete_entry(identity(&headers), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
