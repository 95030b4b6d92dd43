//! Handler for link creation.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse};
use crate::domain::entities::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for the authenticated owner.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "example.com/page",
///   "customAlias": "mylink"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "originalUrl": "http://example.com/page",
///   "shortId": "aB3dE6gH",
///   "customAlias": "mylink",
///   "shortUrl": "https://sho.rt/mylink",
///   "createdAt": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400` if the body is malformed or `originalUrl` is missing/blank
/// - `409` if `customAlias` is already in use
/// - `500` if no unique short id could be allocated
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    headers: HeaderMap,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let original_url = payload.original_url.unwrap_or_default();

    let link = state
        .link_service
        .create_link(owner, &original_url, payload.custom_alias.as_deref())
        .await?;

    let base_url = public_base_url(&state, &headers);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse::from_link(link, &base_url)),
    ))
}

/// Base for advertised short URLs: the configured `BASE_URL`, or the
/// request's `Host` header when none is configured.
fn public_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base_url) = &state.base_url {
        return base_url.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("http://{host}")
}
