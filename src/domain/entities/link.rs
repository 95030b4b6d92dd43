//! Link entity binding a destination URL to a short id and optional alias.

use chrono::{DateTime, Utc};

use super::OwnerId;

/// A persisted short link.
///
/// Links are immutable once created: neither the short id nor the alias can
/// change, and the destination is stored already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub owner: OwnerId,
    pub destination_url: String,
    pub short_id: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        owner: OwnerId,
        destination_url: String,
        short_id: String,
        custom_alias: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            destination_url,
            short_id,
            custom_alias,
            created_at,
        }
    }

    /// Key under which the link is advertised: the alias when present,
    /// otherwise the generated short id.
    pub fn public_key(&self) -> &str {
        self.custom_alias.as_deref().unwrap_or(&self.short_id)
    }
}

/// Input data for persisting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub owner: OwnerId,
    pub destination_url: String,
    pub short_id: String,
    pub custom_alias: Option<String>,
}
