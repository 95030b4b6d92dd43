//! In-memory repositories for tests and embedding.
//!
//! Both stores keep their data behind a single `RwLock`, so every write,
//! including the uniqueness checks in [`MemoryLinkRepository::create`],
//! happens atomically. Data is lost when the store is dropped.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::entities::{Link, NewLink, OwnerId};
use crate::domain::repositories::{ApiToken, CreateLinkError, LinkRepository, TokenRepository};
use crate::error::AppError;

fn poisoned<E: std::fmt::Display>(e: E) -> AppError {
    AppError::internal("Storage lock poisoned", json!({ "reason": e.to_string() }))
}

#[derive(Debug, Default)]
struct LinkTables {
    next_id: i64,
    by_short_id: HashMap<String, Link>,
    /// alias -> short id
    aliases: HashMap<String, String>,
}

/// An in-memory implementation of [`LinkRepository`].
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    tables: RwLock<LinkTables>,
}

impl MemoryLinkRepository {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, CreateLinkError> {
        let mut tables = self.tables.write().map_err(poisoned)?;

        if tables.by_short_id.contains_key(&new_link.short_id) {
            return Err(CreateLinkError::ShortIdTaken(new_link.short_id));
        }

        if let Some(alias) = &new_link.custom_alias
            && tables.aliases.contains_key(alias)
        {
            return Err(CreateLinkError::AliasTaken(alias.clone()));
        }

        tables.next_id += 1;
        let link = Link::new(
            tables.next_id,
            new_link.owner,
            new_link.destination_url,
            new_link.short_id,
            new_link.custom_alias,
            Utc::now(),
        );

        if let Some(alias) = &link.custom_alias {
            tables.aliases.insert(alias.clone(), link.short_id.clone());
        }
        tables.by_short_id.insert(link.short_id.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables.read().map_err(poisoned)?;

        Ok(tables
            .aliases
            .get(alias)
            .and_then(|short_id| tables.by_short_id.get(short_id))
            .cloned())
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.by_short_id.get(short_id).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.by_short_id.len() as i64)
    }
}

/// An in-memory implementation of [`TokenRepository`].
#[derive(Debug, Default)]
pub struct MemoryTokenRepository {
    tokens: RwLock<Vec<ApiToken>>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<OwnerId>, AppError> {
        let tokens = self.tokens.read().map_err(poisoned)?;

        Ok(tokens
            .iter()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
            .map(|t| t.owner.clone()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;

        if let Some(token) = tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            token.last_used_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn create_token(
        &self,
        owner: &OwnerId,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;

        if tokens.iter().any(|t| t.name == name || t.token_hash == token_hash) {
            return Err(AppError::conflict("Token already exists", json!({ "name": name })));
        }

        let token = ApiToken {
            id: tokens.len() as i64 + 1,
            owner: owner.clone(),
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tokens.push(token.clone());

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let tokens = self.tokens.read().map_err(poisoned)?;
        Ok(tokens.iter().rev().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let tokens = self.tokens.read().map_err(poisoned)?;
        Ok(tokens.iter().find(|t| t.name == name).cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;

        match tokens.iter_mut().find(|t| t.id == id && !t.is_revoked()) {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(())
            }
            None => Err(AppError::not_found(
                "Token not found or already revoked",
                json!({ "id": id }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(short_id: &str, alias: Option<&str>) -> NewLink {
        NewLink {
            owner: OwnerId::new("alice"),
            destination_url: "http://example.com".to_string(),
            short_id: short_id.to_string(),
            custom_alias: alias.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryLinkRepository::new();

        let link = repo.create(new_link("abcd1234", Some("mylink"))).await.unwrap();

        assert_eq!(link.id, 1);
        assert_eq!(
            repo.find_by_short_id("abcd1234").await.unwrap(),
            Some(link.clone())
        );
        assert_eq!(repo.find_by_alias("mylink").await.unwrap(), Some(link));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_short_id_rejected() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("abcd1234", None)).await.unwrap();

        let err = repo.create(new_link("abcd1234", None)).await.unwrap_err();

        assert!(matches!(err, CreateLinkError::ShortIdTaken(id) if id == "abcd1234"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_alias_rejected_without_side_effects() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("aaaaaaaa", Some("mylink"))).await.unwrap();

        let err = repo
            .create(new_link("bbbbbbbb", Some("mylink")))
            .await
            .unwrap_err();

        assert!(matches!(err, CreateLinkError::AliasTaken(alias) if alias == "mylink"));
        assert!(repo.find_by_short_id("bbbbbbbb").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_alias_and_short_id_namespaces_are_separate() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("aaaaaaaa", Some("bbbbbbbb"))).await.unwrap();

        assert!(repo.create(new_link("bbbbbbbb", None)).await.is_ok());
        assert!(repo.find_by_alias("aaaaaaaa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let repo = MemoryTokenRepository::new();
        let owner = OwnerId::new("alice");

        let token = repo.create_token(&owner, "laptop", "hash-1").await.unwrap();
        assert_eq!(repo.find_owner("hash-1").await.unwrap(), Some(owner.clone()));

        repo.update_last_used("hash-1").await.unwrap();
        let stored = repo.find_by_name("laptop").await.unwrap().unwrap();
        assert!(stored.last_used_at.is_some());

        repo.revoke_token(token.id).await.unwrap();
        assert_eq!(repo.find_owner("hash-1").await.unwrap(), None);
        assert!(matches!(
            repo.revoke_token(token.id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_duplicate_token_name_rejected() {
        let repo = MemoryTokenRepository::new();
        let owner = OwnerId::new("alice");

        repo.create_token(&owner, "laptop", "hash-1").await.unwrap();
        let err = repo
            .create_token(&owner, "laptop", "hash-2")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.list_tokens().await.unwrap().len(), 1);
    }
}
