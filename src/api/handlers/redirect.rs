//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a key (alias or short id) to its destination.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// The key is resolved as a custom alias first and as a generated short id
/// second. Responds with `302 Found`.
///
/// # Errors
///
/// Returns 404 Not Found if the key matches neither namespace.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.redirect_service.resolve(&key).await?;

    let location = HeaderValue::from_bytes(link.destination_url.as_bytes()).map_err(|_| {
        AppError::internal(
            "Stored destination is not a valid Location header",
            json!({ "key": key }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
