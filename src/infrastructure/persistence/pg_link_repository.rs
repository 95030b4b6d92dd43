//! PostgreSQL implementation of the link registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, OwnerId};
use crate::domain::repositories::{CreateLinkError, LinkRepository};
use crate::error::AppError;
use crate::utils::db_error::{LinkConstraint, unique_violation};

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    owner: String,
    destination_url: String,
    short_id: String,
    custom_alias: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            OwnerId::new(row.owner),
            row.destination_url,
            row.short_id,
            row.custom_alias,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of both namespaces is enforced by the `links_short_id_key` and
/// `links_custom_alias_key` constraints, so concurrent inserts of the same
/// value are rejected atomically by the database.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, CreateLinkError> {
        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (owner, destination_url, short_id, custom_alias)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner, destination_url, short_id, custom_alias, created_at
            "#,
        )
        .bind(new_link.owner.as_str())
        .bind(&new_link.destination_url)
        .bind(&new_link.short_id)
        .bind(new_link.custom_alias.as_deref())
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) => match unique_violation(&e) {
                Some(LinkConstraint::ShortId) => {
                    Err(CreateLinkError::ShortIdTaken(new_link.short_id))
                }
                Some(LinkConstraint::Alias) => Err(CreateLinkError::AliasTaken(
                    new_link.custom_alias.unwrap_or_default(),
                )),
                None => Err(CreateLinkError::Storage(e.into())),
            },
        }
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, owner, destination_url, short_id, custom_alias, created_at
            FROM links
            WHERE custom_alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, owner, destination_url, short_id, custom_alias, created_at
            FROM links
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
