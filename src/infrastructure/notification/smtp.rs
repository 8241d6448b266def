//! SMTP birthday notifier built on lettre

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SmtpConfig;
use crate::domain::notification::{BirthdayNotifier, DeliveryOutcome};
use crate::domain::DomainError;

/// Notifier that delivers congratulatory emails over SMTP.
///
/// Delivery failures of every kind are folded into
/// [`DeliveryOutcome::Failed`]; this type never raises on the send path.
pub struct SmtpNotifier {
    config: SmtpConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// Build a notifier from SMTP configuration
    pub fn new(config: SmtpConfig) -> Result<Self, DomainError> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| DomainError::configuration(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { config, mailer })
    }

    /// Send a diagnostic message to the configured account address.
    ///
    /// Used by the `test-email` CLI subcommand to verify credentials and
    /// connectivity before relying on the daily scan.
    pub async fn send_test_message(&self) -> DeliveryOutcome {
        info!("Sending test email");
        let to = self.config.username.clone();
        self.deliver(&to, "Test User", "Test Email - Birthday Reminder")
            .await
    }

    async fn deliver(&self, to: &str, display_name: &str, subject: &str) -> DeliveryOutcome {
        let from: Mailbox = match format!("{} <{}>", self.config.from_name, self.config.username)
            .parse()
        {
            Ok(mailbox) => mailbox,
            Err(e) => {
                return DeliveryOutcome::Failed {
                    reason: format!("Invalid sender address: {}", e),
                }
            }
        };

        let to_mailbox: Mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                return DeliveryOutcome::Failed {
                    reason: format!("Invalid recipient address: {}", e),
                }
            }
        };

        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.config.host);

        let message = match Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML)
            .body(birthday_email_html(display_name))
        {
            Ok(message) => message,
            Err(e) => {
                return DeliveryOutcome::Failed {
                    reason: format!("Failed to build message: {}", e),
                }
            }
        };

        match self.mailer.send(message).await {
            Ok(_) => {
                info!(to = %to, message_id = %message_id, "Birthday email sent");
                DeliveryOutcome::Sent { message_id }
            }
            Err(e) => {
                warn!(to = %to, error = %e, "Failed to send birthday email");
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl BirthdayNotifier for SmtpNotifier {
    async fn send(&self, to: &str, display_name: &str) -> DeliveryOutcome {
        info!(to = %to, username = %display_name, "Preparing birthday email");
        let subject = format!("Happy Birthday, {}!", display_name);
        self.deliver(to, display_name, &subject).await
    }
}

/// HTML payload for the congratulatory email
fn birthday_email_html(username: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width" />
  <style>
    body {{ font-family: Arial, sans-serif; margin:0; padding:40px; background: linear-gradient(135deg,#667eea 0%,#764ba2 100%); }}
    .container {{ max-width:600px; margin:0 auto; background:#fff; border-radius:20px; padding:40px; box-shadow:0 10px 40px rgba(0,0,0,0.2); }}
    h1 {{ color:#667eea; text-align:center; font-size:2rem; }}
    .message {{ color:#333; font-size:1rem; line-height:1.6; text-align:center; }}
    .signature {{ text-align:center; color:#666; margin-top:30px; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>Happy Birthday, {username}!</h1>
    <div class="message">
      <p>Wishing you a wonderful day filled with joy and celebration.</p>
    </div>
    <div class="signature">
      <p>Best regards,</p>
      <p><strong>Birthday Reminder App Team</strong></p>
    </div>
  </div>
</body>
</html>"#
    )
}
