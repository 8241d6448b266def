//! Per-run scan summary

use serde::Serialize;

/// Counts produced by one scan run.
///
/// Constructed fresh each run, reported once, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Every record fetched from the store this run
    pub total_records_scanned: usize,
    /// Records whose birth month/day matched today
    pub matches_found: usize,
    /// Deliveries the notifier accepted
    pub notifications_sent: usize,
    /// Deliveries the notifier reported as failed
    pub notifications_failed: usize,
}

impl ScanOutcome {
    /// Record a match and its delivery result
    pub fn record_attempt(&mut self, sent: bool) {
        self.matches_found += 1;
        if sent {
            self.notifications_sent += 1;
        } else {
            self.notifications_failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let outcome = ScanOutcome::default();
        assert_eq!(outcome.total_records_scanned, 0);
        assert_eq!(outcome.matches_found, 0);
        assert_eq!(outcome.notifications_sent, 0);
        assert_eq!(outcome.notifications_failed, 0);
    }

    #[test]
    fn test_record_attempt_tallies() {
        let mut outcome = ScanOutcome::default();
        outcome.record_attempt(true);
        outcome.record_attempt(true);
        outcome.record_attempt(false);

        assert_eq!(outcome.matches_found, 3);
        assert_eq!(outcome.notifications_sent, 2);
        assert_eq!(outcome.notifications_failed, 1);
    }

    #[test]
    fn test_serializes_counts() {
        let outcome = ScanOutcome {
            total_records_scanned: 5,
            matches_found: 2,
            notifications_sent: 1,
            notifications_failed: 1,
        };

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"total_records_scanned\":5"));
        assert!(json.contains("\"notifications_failed\":1"));
    }
}
