//! Link creation service: normalization, alias reservation and short id allocation.
//!
//! Emits the `links_created_total`, `short_id_collisions_total` and
//! `short_id_allocation_exhausted_total` counters through the `metrics` facade.
//! They are dropped unless the embedding application installs a recorder.

use std::iter;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tracing::{error, info, warn};

use crate::domain::entities::{Link, NewLink, OwnerId};
use crate::domain::repositories::{CreateLinkError, LinkRepository};
use crate::error::AppError;
use crate::utils::short_id::{generate_short_id, validate_alias};
use crate::utils::url_normalizer::normalize_url;

/// Total number of short id candidates tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Maximum length of a destination URL, in characters, after trimming.
pub const MAX_URL_LENGTH: usize = 2048;

/// Outcome of a single allocation attempt that did not produce a link.
#[derive(Debug)]
enum AttemptError {
    /// The candidate short id is already in use; try another one.
    Collision(String),
    /// Any other failure; aborts allocation.
    Failed(AppError),
}

/// Service for creating short links.
///
/// The registry's atomic uniqueness check is the source of truth: the
/// existence lookups done here only avoid a pointless insert when a
/// collision is already visible.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link owned by `owner`.
    ///
    /// # Flow
    ///
    /// 1. Reject a blank destination
    /// 2. Normalize the destination (prefix `http://` when no scheme)
    /// 3. If an alias is given (trimmed, non-blank): validate it and reject it
    ///    when already taken
    /// 4. Allocate a random short id and persist, retrying on collisions
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the destination is blank, longer than
    /// [`MAX_URL_LENGTH`] or contains control characters, or if the alias is invalid.
    ///
    /// Returns [`AppError::Conflict`] if the alias is already in use, including
    /// when a concurrent request claims it between the check and the insert.
    ///
    /// Returns [`AppError::AllocationExhausted`] if all
    /// [`MAX_ALLOCATION_ATTEMPTS`] short id candidates collided.
    pub async fn create_link(
        &self,
        owner: OwnerId,
        destination_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<Link, AppError> {
        validate_destination(destination_url)?;

        let destination_url = normalize_url(destination_url);

        let custom_alias = match custom_alias.map(str::trim).filter(|a| !a.is_empty()) {
            Some(alias) => {
                validate_alias(alias)?;
                self.ensure_alias_available(alias).await?;
                Some(alias.to_string())
            }
            None => None,
        };

        let link = self
            .allocate(&owner, &destination_url, custom_alias.as_deref())
            .await?;

        metrics::counter!("links_created_total").increment(1);
        info!(
            short_id = %link.short_id,
            alias = link.custom_alias.as_deref().unwrap_or(""),
            owner = %link.owner,
            "Link created"
        );

        Ok(link)
    }

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Rejects an alias that is already visible in the alias namespace.
    async fn ensure_alias_available(&self, alias: &str) -> Result<(), AppError> {
        if self.link_repository.find_by_alias(alias).await?.is_some() {
            return Err(alias_conflict(alias));
        }

        Ok(())
    }

    /// Persists the link under a freshly generated short id.
    ///
    /// Up to [`MAX_ALLOCATION_ATTEMPTS`] candidates are tried without delay.
    /// Only short id collisions are retried; an alias lost to a concurrent
    /// writer or a storage failure ends the loop immediately.
    async fn allocate(
        &self,
        owner: &OwnerId,
        destination_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<Link, AppError> {
        let retries = iter::repeat(Duration::ZERO).take(MAX_ALLOCATION_ATTEMPTS - 1);

        let result = RetryIf::spawn(
            retries,
            || self.try_allocate(owner, destination_url, custom_alias),
            |e: &AttemptError| matches!(e, AttemptError::Collision(_)),
        )
        .await;

        match result {
            Ok(link) => Ok(link),
            Err(AttemptError::Collision(last)) => {
                metrics::counter!("short_id_allocation_exhausted_total").increment(1);
                error!(
                    attempts = MAX_ALLOCATION_ATTEMPTS,
                    last_candidate = %last,
                    "Short id allocation exhausted"
                );
                Err(AppError::AllocationExhausted {
                    attempts: MAX_ALLOCATION_ATTEMPTS,
                })
            }
            Err(AttemptError::Failed(e)) => Err(e),
        }
    }

    /// Runs one generate, check and insert cycle.
    async fn try_allocate(
        &self,
        owner: &OwnerId,
        destination_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<Link, AttemptError> {
        let short_id = generate_short_id();

        let existing = self
            .link_repository
            .find_by_short_id(&short_id)
            .await
            .map_err(AttemptError::Failed)?;

        if existing.is_some() {
            return Err(collision(short_id, "pre-check"));
        }

        let new_link = NewLink {
            owner: owner.clone(),
            destination_url: destination_url.to_string(),
            short_id,
            custom_alias: custom_alias.map(str::to_string),
        };

        match self.link_repository.create(new_link).await {
            Ok(link) => Ok(link),
            Err(CreateLinkError::ShortIdTaken(short_id)) => Err(collision(short_id, "insert")),
            Err(CreateLinkError::AliasTaken(alias)) => {
                Err(AttemptError::Failed(alias_conflict(&alias)))
            }
            Err(CreateLinkError::Storage(e)) => Err(AttemptError::Failed(e)),
        }
    }
}

/// Rejects destinations that cannot be stored and later sent as a `Location`.
fn validate_destination(destination_url: &str) -> Result<(), AppError> {
    let trimmed = destination_url.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "originalUrl is required",
            json!({ "field": "originalUrl" }),
        ));
    }

    if trimmed.chars().count() > MAX_URL_LENGTH {
        return Err(AppError::bad_request(
            format!("originalUrl must be at most {MAX_URL_LENGTH} characters"),
            json!({ "field": "originalUrl" }),
        ));
    }

    if trimmed.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "originalUrl must not contain control characters",
            json!({ "field": "originalUrl" }),
        ));
    }

    Ok(())
}

fn collision(short_id: String, stage: &'static str) -> AttemptError {
    metrics::counter!("short_id_collisions_total").increment(1);
    warn!(short_id = %short_id, stage, "Short id collision, retrying");
    AttemptError::Collision(short_id)
}

fn alias_conflict(alias: &str) -> AppError {
    AppError::conflict("customAlias already in use", json!({ "alias": alias }))
}
