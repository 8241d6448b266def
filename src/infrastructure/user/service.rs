//! User registration and query service

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::user::{
    normalize_email, validate_email, validate_username, UserId, UserRecord, UserRepository,
};
use crate::domain::DomainError;

/// Request for registering a new birthday record
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

/// Service for registering and querying birthday records
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a new birthday record.
    ///
    /// Validates the fields, normalizes the email, and rejects an address
    /// that is already present (case-insensitively).
    pub async fn register(&self, request: RegisterRequest) -> Result<UserRecord, DomainError> {
        validate_username(&request.username)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;

        let email = normalize_email(&request.email);

        if self.repository.email_exists(&email).await? {
            warn!(email = %email, "Registration rejected: email already exists");
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let record = UserRecord::new(request.username.trim(), email, request.date_of_birth);
        let record = self.repository.insert(record).await?;

        info!(
            username = %record.username(),
            email = %record.email(),
            birthday = %record.formatted_birthday(),
            "Birthday registered"
        );

        Ok(record)
    }

    /// All records, sorted ascending by date of birth
    pub async fn list_all(&self) -> Result<Vec<UserRecord>, DomainError> {
        let mut records = self.repository.find_all().await?;
        records.sort_by_key(|r| r.date_of_birth());
        Ok(records)
    }

    /// Records whose birth month/day fall on `date`
    pub async fn birthdays_on(&self, date: NaiveDate) -> Result<Vec<UserRecord>, DomainError> {
        let records = self.repository.find_all().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.is_birthday_on(date))
            .collect())
    }

    /// Count stored records
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Delete a record (admin/test cleanup path)
    pub async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository> {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_request(username: &str, email: &str, dob: NaiveDate) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            date_of_birth: dob,
        }
    }

    #[tokio::test]
    async fn test_register() {
        let service = create_service();

        let record = service
            .register(make_request("Alice", "alice@example.com", date(2000, 6, 15)))
            .await
            .unwrap();

        assert_eq!(record.username(), "Alice");
        assert_eq!(record.email(), "alice@example.com");
        assert_eq!(record.date_of_birth(), date(2000, 6, 15));
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let service = create_service();

        let record = service
            .register(make_request("Alice", "  Alice@Example.COM ", date(2000, 6, 15)))
            .await
            .unwrap();

        assert_eq!(record.email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_case_insensitively() {
        let service = create_service();

        service
            .register(make_request("Alice", "a@test.com", date(2000, 6, 15)))
            .await
            .unwrap();

        let result = service
            .register(make_request("Other Alice", "A@Test.com", date(1990, 1, 1)))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_fields() {
        let service = create_service();

        let result = service
            .register(make_request("", "alice@example.com", date(2000, 6, 15)))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service
            .register(make_request("Alice", "not-an-email", date(2000, 6, 15)))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_date_of_birth() {
        let service = create_service();

        service
            .register(make_request("Young", "young@example.com", date(2005, 3, 1)))
            .await
            .unwrap();
        service
            .register(make_request("Old", "old@example.com", date(1970, 12, 31)))
            .await
            .unwrap();
        service
            .register(make_request("Middle", "middle@example.com", date(1990, 7, 20)))
            .await
            .unwrap();

        let all = service.list_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.username()).collect();
        assert_eq!(names, vec!["Old", "Middle", "Young"]);
    }

    #[tokio::test]
    async fn test_birthdays_on() {
        let service = create_service();

        service
            .register(make_request("Match", "match@example.com", date(2000, 6, 15)))
            .await
            .unwrap();
        service
            .register(make_request("NoMatch", "nomatch@example.com", date(1990, 1, 1)))
            .await
            .unwrap();

        let matches = service.birthdays_on(date(2024, 6, 15)).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].username(), "Match");
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_service();

        let record = service
            .register(make_request("Alice", "alice@example.com", date(2000, 6, 15)))
            .await
            .unwrap();

        assert!(service.delete(record.id()).await.unwrap());
        assert_eq!(service.count().await.unwrap(), 0);
    }
}
