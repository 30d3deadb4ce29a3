//! Current user and identity provider webhook.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use database::validation::{validate_email, validate_name};
use database::{user, DatabaseError, NewUser, User};
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::{authorize_webhook, identity};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// `GET /api/me` - the caller's user record.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<User>> {
    let subject = identity(&headers).ok_or(ApiError::Unauthenticated)?;
    state
        .journal
        .current_user(Some(subject))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", subject)))
}

/// Envelope of an identity provider webhook delivery.
#[derive(Debug, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: String,
    #[serde(default)]
    email_addresses: Vec<EmailAddress>,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmailAddress {
    email_address: String,
    verification: Option<Verification>,
}

#[derive(Debug, Deserialize)]
struct Verification {
    status: String,
}

#[derive(Debug, Deserialize)]
struct DeletedUser {
    id: Option<String>,
}

impl IdentityUser {
    fn into_new_user(self) -> Result<NewUser> {
        let email = self
            .email_addresses
            .into_iter()
            .find(|address| {
                address
                    .verification
                    .as_ref()
                    .is_some_and(|v| v.status == "verified")
            })
            .map(|address| address.email_address)
            .ok_or_else(|| ApiError::BadRequest("User has no verified email".to_string()))?;
        validate_email(&email)?;

        let name = [self.first_name, self.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let name = if name.is_empty() {
            None
        } else {
            validate_name(&name)?;
            Some(name)
        };

        Ok(NewUser {
            external_auth_id: self.id,
            email,
            name,
            image_url: self.image_url,
        })
    }
}

/// `POST /webhooks/identity` - mirror user lifecycle events.
pub async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<IdentityEvent>,
) -> Result<StatusCode> {
    authorize_webhook(state.webhook_secret.as_deref(), &headers)?;

    match event.event_type.as_str() {
        "user.created" | "user.updated" => {
            let payload: IdentityUser = serde_json::from_value(event.data)
                .map_err(|err| ApiError::BadRequest(format!("Invalid user payload: {}", err)))?;
            let new_user = payload.into_new_user()?;
            let user = user::upsert_user(state.db.pool(), &new_user).await?;
            info!(user_id = user.id, event = %event.event_type, "User synced");
        }
        "user.deleted" => {
            let payload: DeletedUser = serde_json::from_value(event.data)
                .map_err(|err| ApiError::BadRequest(format!("Invalid user payload: {}", err)))?;
            if let Some(id) = payload.id {
                match user::delete_user_by_external_id(state.db.pool(), &id).await {
                    Ok(()) => info!(subject = %id, "User deleted"),
                    Err(DatabaseError::NotFound { .. }) => {
                        debug!(subject = %id, "Deleted user was never synced")
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        other => info!(event = other, "Ignored identity webhook event"),
    }

    Ok(StatusCode::OK)
}
