//! Daily schedule trigger for the birthday scan
//!
//! Fires the scan once per day at a fixed wall-clock time (07:00 by
//! default). The schedule runs for the process lifetime; the returned
//! handle supports cancellation even though nothing uses it today.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::state::ScanServiceTrait;

/// Handle to the running daily schedule task.
///
/// Owned by the composition root; dropping it does NOT stop the schedule.
pub struct ScheduleHandle {
    handle: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Stop the schedule. No further scans will fire.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the schedule task has stopped
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Register the recurring daily trigger.
///
/// Spawns a task that sleeps until the next `hour:minute` local time, runs
/// a scan, and repeats. Errors from a scheduled run are logged only; there
/// is no caller to report them to. Calling this twice registers two
/// independent schedules; deduplication is the caller's responsibility.
pub fn start_daily_schedule(
    scan: Arc<dyn ScanServiceTrait>,
    hour: u32,
    minute: u32,
) -> ScheduleHandle {
    info!(hour, minute, "Daily birthday schedule started");

    let handle = tokio::spawn(async move {
        loop {
            let now = Local::now();
            let fire_at = next_fire_time(now, hour, minute);
            let wait = (fire_at - now).to_std().unwrap_or(Duration::ZERO);

            info!(fire_at = %fire_at.format("%Y-%m-%d %H:%M:%S"), "Next birthday scan scheduled");
            tokio::time::sleep(wait).await;

            info!("Schedule fired: executing birthday scan");
            if let Err(e) = scan.run_scan().await {
                error!(error = %e, "Scheduled birthday scan failed");
            }
        }
    });

    ScheduleHandle { handle }
}

/// Next occurrence of `hour:minute` local time strictly after `now`.
///
/// Skips forward past DST gaps where the wall-clock time does not exist.
fn next_fire_time(now: DateTime<Local>, hour: u32, minute: u32) -> DateTime<Local> {
    let mut day = now.date_naive();

    loop {
        let candidate = day
            .and_hms_opt(hour, minute, 0)
            .and_then(|naive| naive.and_local_timezone(Local).earliest());

        if let Some(fire_at) = candidate {
            if fire_at > now {
                return fire_at;
            }
        }

        day = day.succ_opt().expect("calendar overflow");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_fire_later_today_when_before_trigger_time() {
        let now = local(2024, 6, 15, 6, 30, 0);
        let fire_at = next_fire_time(now, 7, 0);

        assert_eq!(fire_at, local(2024, 6, 15, 7, 0, 0));
    }

    #[test]
    fn test_fire_tomorrow_when_past_trigger_time() {
        let now = local(2024, 6, 15, 7, 0, 1);
        let fire_at = next_fire_time(now, 7, 0);

        assert_eq!(fire_at, local(2024, 6, 16, 7, 0, 0));
    }

    #[test]
    fn test_fire_tomorrow_at_exact_trigger_instant() {
        // Firing strictly after `now` avoids a double fire at the boundary
        let now = local(2024, 6, 15, 7, 0, 0);
        let fire_at = next_fire_time(now, 7, 0);

        assert_eq!(fire_at, local(2024, 6, 16, 7, 0, 0));
    }

    #[test]
    fn test_fire_crosses_month_boundary() {
        let now = local(2024, 6, 30, 8, 0, 0);
        let fire_at = next_fire_time(now, 7, 0);

        assert_eq!(fire_at, local(2024, 7, 1, 7, 0, 0));
    }

    #[tokio::test]
    async fn test_cancel_stops_schedule() {
        use crate::domain::notification::MockNotifier;
        use crate::domain::user::MockUserRepository;
        use crate::infrastructure::scan::BirthdayScanService;

        let scan: Arc<dyn ScanServiceTrait> = Arc::new(BirthdayScanService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockNotifier::new()),
        ));

        let handle = start_daily_schedule(scan, 7, 0);
        assert!(!handle.is_finished());

        handle.cancel();
        // Abort is asynchronous; yield until the task winds down
        for _ in 0..100 {
            if handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(handle.is_finished());
    }
}
