//! Repository trait for the link registry.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Failure modes of [`LinkRepository::create`].
///
/// Uniqueness violations are reported separately per namespace so the caller
/// can retry a colliding short id while rejecting a taken alias.
#[derive(Debug, thiserror::Error)]
pub enum CreateLinkError {
    #[error("short id `{0}` is already taken")]
    ShortIdTaken(String),

    #[error("custom alias `{0}` is already taken")]
    AliasTaken(String),

    #[error(transparent)]
    Storage(#[from] AppError),
}

/// Persistent mapping from short ids and aliases to links.
///
/// Implementations must reject a duplicate short id or alias atomically in
/// [`create`](LinkRepository::create); the `find_*` lookups are only advisory
/// for uniqueness purposes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link in a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`CreateLinkError::ShortIdTaken`] or [`CreateLinkError::AliasTaken`]
    /// when the corresponding uniqueness constraint would be violated. Nothing is
    /// stored in that case.
    ///
    /// Returns [`CreateLinkError::Storage`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, CreateLinkError>;

    /// Finds a link by its custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its generated short id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
