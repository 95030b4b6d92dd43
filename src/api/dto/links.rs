//! DTOs for the link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// `originalUrl` is optional at the type level so that a missing field is
/// reported with the same validation error as a blank one.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Destination to redirect to. Scheme is optional (`http://` is assumed).
    #[serde(alias = "destinationUrl")]
    #[validate(length(max = 2048, message = "originalUrl must be at most 2048 characters"))]
    pub original_url: Option<String>,

    /// Optional user-chosen alias, trimmed before use.
    #[validate(length(max = 128, message = "customAlias is too long"))]
    pub custom_alias: Option<String>,
}

/// Created link as returned to the owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_id: String,
    pub custom_alias: Option<String>,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl CreateLinkResponse {
    /// Builds the response, advertising the alias over the short id.
    pub fn from_link(link: Link, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), link.public_key());

        Self {
            id: link.id,
            original_url: link.destination_url,
            short_id: link.short_id,
            custom_alias: link.custom_alias,
            short_url,
            created_at: link.created_at,
        }
    }
}
