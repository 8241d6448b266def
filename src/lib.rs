//! Birthday Reminder Service
//!
//! Registers a name, email, and date of birth per user, then scans the
//! stored records once a day and emails a congratulatory message to
//! everyone whose birth month and day match the current date. Outbound
//! deliveries are paced and partial failures are tolerated and tallied.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use domain::notification::BirthdayNotifier;
use domain::user::UserRepository;
use infrastructure::notification::SmtpNotifier;
use infrastructure::scan::BirthdayScanService;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let notifier = Arc::new(SmtpNotifier::new(config.smtp.clone())?);
    let pace = Duration::from_secs(config.schedule.pace_secs);

    match config.storage.backend.as_str() {
        "postgres" => {
            info!("Using PostgreSQL record store");

            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let repository = Arc::new(PostgresUserRepository::new(pool));
            repository.ensure_schema().await?;

            Ok(build_app_state(repository, notifier, pace))
        }
        _ => {
            info!("Using in-memory record store");
            Ok(build_app_state(
                Arc::new(InMemoryUserRepository::new()),
                notifier,
                pace,
            ))
        }
    }
}

fn build_app_state<R, N>(repository: Arc<R>, notifier: Arc<N>, pace: Duration) -> AppState
where
    R: UserRepository + 'static,
    N: BirthdayNotifier + 'static,
{
    let user_service = Arc::new(UserService::new(repository.clone()));
    let scan_service =
        Arc::new(BirthdayScanService::new(repository, notifier).with_pace(pace));

    AppState::new(user_service, scan_service)
}
