//! Daily birthday scan orchestrator

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use crate::domain::notification::BirthdayNotifier;
use crate::domain::scan::ScanOutcome;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

/// Pause between consecutive notification attempts
const DEFAULT_PACE: Duration = Duration::from_secs(1);

/// Orchestrates one end-to-end birthday scan: fetch every record, match
/// against today, deliver a greeting per match, tally the outcomes.
///
/// Both collaborators are injected at construction so a test double can
/// stand in for either. Matches are processed strictly one at a time; the
/// pacing pause after each attempt keeps at most one notifier call in
/// flight.
pub struct BirthdayScanService<R: UserRepository, N: BirthdayNotifier> {
    repository: Arc<R>,
    notifier: Arc<N>,
    pace: Duration,
}

impl<R: UserRepository, N: BirthdayNotifier> BirthdayScanService<R, N> {
    /// Create a scan service with the default 1-second pacing
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
            pace: DEFAULT_PACE,
        }
    }

    /// Override the pause between notification attempts
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Run a scan against the current local date.
    ///
    /// A storage failure at the fetch stage aborts the run with no partial
    /// outcome; a failed delivery is tallied and the scan continues.
    pub async fn run_scan(&self) -> Result<ScanOutcome, DomainError> {
        self.scan_for(Local::now().date_naive()).await
    }

    /// Run a scan as if today were `date`
    pub async fn scan_for(&self, date: NaiveDate) -> Result<ScanOutcome, DomainError> {
        info!("Birthday scan started");

        let records = self.repository.find_all().await.map_err(|e| {
            error!(error = %e, stage = "fetch", "Birthday scan aborted");
            e
        })?;

        let mut outcome = ScanOutcome {
            total_records_scanned: records.len(),
            ..Default::default()
        };

        for record in &records {
            if !record.is_birthday_on(date) {
                continue;
            }

            info!(
                username = %record.username(),
                email = %record.email(),
                birthday = %record.formatted_birthday(),
                "Birthday detected"
            );

            let delivery = self.notifier.send(record.email(), record.username()).await;
            if !delivery.is_sent() {
                warn!(email = %record.email(), "Birthday notification failed");
            }
            outcome.record_attempt(delivery.is_sent());

            // Throttle outbound deliveries against the transport's rate limits
            tokio::time::sleep(self.pace).await;
        }

        info!(
            total_records = outcome.total_records_scanned,
            matches = outcome.matches_found,
            sent = outcome.notifications_sent,
            failed = outcome.notifications_failed,
            "Birthday scan completed"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::MockNotifier;
    use crate::domain::user::{MockUserRepository, UserRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(username: &str, email: &str, dob: NaiveDate) -> UserRecord {
        UserRecord::new(username, email, dob)
    }

    async fn create_service(
        records: Vec<UserRecord>,
    ) -> BirthdayScanService<MockUserRepository, MockNotifier> {
        let repository = Arc::new(MockUserRepository::with_records(records).await);
        let notifier = Arc::new(MockNotifier::new());
        BirthdayScanService::new(repository, notifier).with_pace(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_scan_with_no_records() {
        let service = create_service(vec![]).await;

        let outcome = service.scan_for(date(2024, 6, 15)).await.unwrap();

        assert_eq!(outcome.total_records_scanned, 0);
        assert_eq!(outcome.matches_found, 0);
        assert_eq!(outcome.notifications_sent, 0);
        assert_eq!(outcome.notifications_failed, 0);
    }

    #[tokio::test]
    async fn test_scan_counts_all_successful() {
        let service = create_service(vec![
            record("Alice", "alice@example.com", date(2000, 6, 15)),
            record("Bob", "bob@example.com", date(1985, 6, 15)),
            record("Carol", "carol@example.com", date(1990, 1, 1)),
        ])
        .await;

        let outcome = service.scan_for(date(2024, 6, 15)).await.unwrap();

        assert_eq!(outcome.total_records_scanned, 3);
        assert_eq!(outcome.matches_found, 2);
        assert_eq!(outcome.notifications_sent, 2);
        assert_eq!(outcome.notifications_failed, 0);
    }

    #[tokio::test]
    async fn test_scan_continues_after_delivery_failure() {
        let repository = Arc::new(
            MockUserRepository::with_records(vec![
                record("Alice", "alice@example.com", date(2000, 6, 15)),
                record("Bob", "bob@example.com", date(1985, 6, 15)),
                record("Carol", "carol@example.com", date(1970, 6, 15)),
            ])
            .await,
        );
        let notifier = Arc::new(MockNotifier::new());
        notifier.fail_for("bob@example.com").await;

        let service = BirthdayScanService::new(repository, notifier.clone())
            .with_pace(Duration::ZERO);

        let outcome = service.scan_for(date(2024, 6, 15)).await.unwrap();

        assert_eq!(outcome.matches_found, 3);
        assert_eq!(outcome.notifications_sent, 2);
        assert_eq!(outcome.notifications_failed, 1);
        // All three were attempted despite the failure in the middle
        assert_eq!(notifier.deliveries().await.len(), 3);
    }

    #[tokio::test]
    async fn test_scan_aborts_when_fetch_fails() {
        let repository = Arc::new(MockUserRepository::new());
        repository.set_should_fail(true).await;
        let notifier = Arc::new(MockNotifier::new());

        let service = BirthdayScanService::new(repository, notifier.clone())
            .with_pace(Duration::ZERO);

        let result = service.scan_for(date(2024, 6, 15)).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
        assert!(notifier.deliveries().await.is_empty());
    }

    #[tokio::test]
    async fn test_scan_notifies_only_matching_record() {
        let repository = Arc::new(
            MockUserRepository::with_records(vec![
                record("June Kid", "june@example.com", date(2000, 6, 15)),
                record("New Year Kid", "jan@example.com", date(1990, 1, 1)),
            ])
            .await,
        );
        let notifier = Arc::new(MockNotifier::new());

        let service = BirthdayScanService::new(repository, notifier.clone())
            .with_pace(Duration::ZERO);

        let outcome = service.scan_for(date(2024, 6, 15)).await.unwrap();

        assert_eq!(outcome.matches_found, 1);

        let deliveries = notifier.deliveries().await;
        assert_eq!(
            deliveries,
            vec![("june@example.com".to_string(), "June Kid".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_paces_between_attempts() {
        let service = {
            let repository = Arc::new(
                MockUserRepository::with_records(vec![
                    record("Alice", "alice@example.com", date(2000, 6, 15)),
                    record("Bob", "bob@example.com", date(1985, 6, 15)),
                ])
                .await,
            );
            let notifier = Arc::new(MockNotifier::new());
            BirthdayScanService::new(repository, notifier)
                .with_pace(Duration::from_secs(1))
        };

        let start = tokio::time::Instant::now();
        let outcome = service.scan_for(date(2024, 6, 15)).await.unwrap();

        // One pacing pause per attempted notification
        assert_eq!(outcome.matches_found, 2);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_scan_matches_regardless_of_birth_year() {
        let service = create_service(vec![
            record("Old", "old@example.com", date(1950, 6, 15)),
            record("Young", "young@example.com", date(2020, 6, 15)),
        ])
        .await;

        let outcome = service.scan_for(date(2024, 6, 15)).await.unwrap();

        assert_eq!(outcome.matches_found, 2);
        assert_eq!(outcome.notifications_sent, 2);
    }
}
