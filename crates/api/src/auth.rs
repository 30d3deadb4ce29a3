//! Caller identity and webhook secret checks.
//!
//! Sign-in happens upstream. The identity gateway forwards the verified
//! subject in [`IDENTITY_HEADER`]; a request without it is unauthenticated.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

use crate::error::ApiError;

/// Header carrying the identity provider's subject for the caller.
pub const IDENTITY_HEADER: &str = "x-identity-subject";

/// Header carrying the identity webhook shared secret.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Subject of the authenticated caller, if any.
pub fn identity(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(IDENTITY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|subject| !subject.is_empty())
}

/// Check the webhook secret.
///
/// Deliveries are refused outright when no secret is configured.
pub fn authorize_webhook(expected: Option<&str>, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        return Err(ApiError::Internal(
            "Webhook secret not configured".to_string(),
        ));
    };

    let Some(value) = headers.get(WEBHOOK_SECRET_HEADER) else {
        return Err(ApiError::Unauthenticated);
    };

    if !secrets_match(value.as_bytes(), expected.as_bytes()) {
        return Err(ApiError::Unauthenticated);
    }

    Ok(())
}

// Compares fixed-length digests without early exit.
fn secrets_match(given: &[u8], expected: &[u8]) -> bool {
    let given = Sha256::digest(given);
    let expected = Sha256::digest(expected);
    given
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
