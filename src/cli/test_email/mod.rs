//! Test-email command - verify SMTP configuration

use crate::config::AppConfig;
use crate::domain::notification::DeliveryOutcome;
use crate::infrastructure::logging;
use crate::infrastructure::notification::SmtpNotifier;

/// Send a diagnostic email to the configured account address
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let notifier = SmtpNotifier::new(config.smtp.clone())?;

    match notifier.send_test_message().await {
        DeliveryOutcome::Sent { message_id } => {
            println!("Test email sent successfully ({})", message_id);
            Ok(())
        }
        DeliveryOutcome::Failed { reason } => {
            anyhow::bail!("Failed to send test email: {}", reason)
        }
    }
}
