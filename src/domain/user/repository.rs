//! User record repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{UserId, UserRecord};
use crate::domain::DomainError;

/// Repository trait for the record store.
///
/// Emails are unique case-insensitively; implementations receive them
/// already normalized to lowercase and must reject a duplicate insert with
/// [`DomainError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a new record
    async fn insert(&self, record: UserRecord) -> Result<UserRecord, DomainError>;

    /// Find a record by its normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Fetch every stored record, in no defined order
    async fn find_all(&self) -> Result<Vec<UserRecord>, DomainError>;

    /// Count stored records
    async fn count(&self) -> Result<usize, DomainError>;

    /// Delete a record (admin/test cleanup path)
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Check whether a normalized email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
