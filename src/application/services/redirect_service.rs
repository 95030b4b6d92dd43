//! Resolution of inbound short link keys.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Resolves a lookup key to its link.
///
/// Aliases and short ids are allocated independently, so the same string can
/// exist in both namespaces. The alias namespace always wins.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Looks up `key` as an alias first, then as a short id.
    ///
    /// This is a pure read and never mutates the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the key matches neither namespace.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, key: &str) -> Result<Link, AppError> {
        if let Some(link) = self.link_repository.find_by_alias(key).await? {
            debug!(key, "Resolved by alias");
            return Ok(link);
        }

        if let Some(link) = self.link_repository.find_by_short_id(key).await? {
            debug!(key, "Resolved by short id");
            return Ok(link);
        }

        Err(AppError::not_found("Short URL not found", json!({ "key": key })))
    }
}
