//! Completion routes.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use tracker_core::week::week_window_start_millis;
use tracker_core::{CompletionCounts, CompletionFlags};

use crate::auth::identity;
use crate::error::Result;
use crate::journal::CompletionSummary;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    /// Window start in epoch millis.
    pub start: Option<i64>,
}

/// `GET /api/completion/weekly` - flags for the current week unless `start` is given.
///
/// Responds with `null` for unauthenticated callers.
pub async fn weekly(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Option<CompletionFlags>>> {
    let start = query
        .start
        .unwrap_or_else(|| week_window_start_millis(&Local::now()));
    let flags = state
        .journal
        .weekly_completion(identity(&headers), start)
        .await?;
    Ok(Json(flags))
}

/// `GET /api/completion` - counts since `start`, all time by default.
pub async fn counts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WindowQuery>,
) -> Result<Json<CompletionCounts>> {
    let counts = state
        .journal
        .entry_completion(identity(&headers), query.start.unwrap_or(0))
        .await?;
    Ok(Json(counts))
}

pub async fn summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Option<CompletionSummary>>> {
    let start = query
        .start
        .unwrap_or_else(|| week_window_start_millis(&Local::now()));
    let summary = state
        .journal
        .completion_summary(identity(&headers), start)
        .await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::IDENTITY_HEADER;
    use axum::http::HeaderValue;
    use database::{user, Database, NewUser};

    #[tokio::test]
    async fn test_weekly_is_null_without_identity() {
        let state = AppState::new(Database::in_memory().await.unwrap(), None);
        let Json(flags) = weekly(State(state), HeaderMap::new(), Query(WindowQuery::default()))
            .await
            .unwrap();
        assert_eq!(serde_json::to_value(flags).unwrap(), serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_counts_serialize_every_dimension() {
        let db = Database::in_memory().await.unwrap();
        user::upsert_user(
            db.pool(),
            &NewUser {
                external_auth_id: "user_a".to_string(),
                email: "a@example.com".to_string(),
                name: None,
                image_url: None,
            },
        )
        .await
        .unwrap();
        let state = AppState::new(db, None);
        state
            .journal
            .create_entry_at(Some("user_a"), "family", "call home", 5)
            .await
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_HEADER, HeaderValue::from_static("user_a"));
        let Json(body) = counts(State(state), headers, Query(WindowQuery::default()))
            .await
            .unwrap();

        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 8);
        assert_eq!(value["family"], 1);
        assert_eq!(value["health"], 0);
    }
}
