//! Notifier trait and delivery outcome types

use async_trait::async_trait;

/// Result of a single delivery attempt.
///
/// Ordinary delivery failures are returned, not raised, so the scan can
/// tally them without error-handling overhead on the hot path. Transport
/// errors are folded into [`DeliveryOutcome::Failed`] by implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The message was accepted for delivery
    Sent { message_id: String },
    /// The attempt failed; `reason` is logged and tallied
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Capability to deliver a congratulatory message to an address
#[async_trait]
pub trait BirthdayNotifier: Send + Sync {
    /// Attempt to deliver a birthday greeting to `to`, addressed to
    /// `display_name`.
    async fn send(&self, to: &str, display_name: &str) -> DeliveryOutcome;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_sent() {
        let sent = DeliveryOutcome::Sent {
            message_id: "abc-123".to_string(),
        };
        let failed = DeliveryOutcome::Failed {
            reason: "mailbox full".to_string(),
        };

        assert!(sent.is_sent());
        assert!(!failed.is_sent());
    }
}
