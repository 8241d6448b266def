//! In-memory user record repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::{UserId, UserRecord, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of [`UserRepository`].
///
/// The default backend for local development and tests; records live for
/// the process lifetime only.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: UserRecord) -> Result<UserRecord, DomainError> {
        let mut records = self.records.write().await;

        // Emails arrive normalized; equality is the uniqueness check
        if records.values().any(|r| r.email() == record.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                record.email()
            )));
        }

        records.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.email() == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<UserRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let records = self.records.read().await;
        Ok(records.len())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(&id).is_some())
    }
}
