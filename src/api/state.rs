//! Application state for shared services

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::notification::BirthdayNotifier;
use crate::domain::user::{UserRecord, UserRepository};
use crate::domain::{DomainError, ScanOutcome};
use crate::infrastructure::scan::BirthdayScanService;
use crate::infrastructure::user::{RegisterRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub scan_service: Arc<dyn ScanServiceTrait>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        scan_service: Arc<dyn ScanServiceTrait>,
    ) -> Self {
        Self {
            user_service,
            scan_service,
        }
    }
}

/// Trait for registration and query operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<UserRecord, DomainError>;
    async fn list_all(&self) -> Result<Vec<UserRecord>, DomainError>;
    async fn birthdays_on(&self, date: NaiveDate) -> Result<Vec<UserRecord>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for triggering a birthday scan on demand
#[async_trait::async_trait]
pub trait ScanServiceTrait: Send + Sync {
    async fn run_scan(&self) -> Result<ScanOutcome, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository> UserServiceTrait for UserService<R> {
    async fn register(&self, request: RegisterRequest) -> Result<UserRecord, DomainError> {
        UserService::register(self, request).await
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, DomainError> {
        UserService::list_all(self).await
    }

    async fn birthdays_on(&self, date: NaiveDate) -> Result<Vec<UserRecord>, DomainError> {
        UserService::birthdays_on(self, date).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: UserRepository, N: BirthdayNotifier> ScanServiceTrait for BirthdayScanService<R, N> {
    async fn run_scan(&self) -> Result<ScanOutcome, DomainError> {
        BirthdayScanService::run_scan(self).await
    }
}
