//! Once-a-day trigger for the archive rotation.
//!
//! ```text
//! ScheduledArchiveTrigger ──sleep until HH:MM──► DailyTick::on_daily_tick(day)
//!          ▲                                              │
//!          └────────────── next day ◄─────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::day::DayKey;
use crate::port::inbound::schedule::DailyTick;

/// Fires a [`DailyTick`] once per calendar day at a fixed local time.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledArchiveTrigger {
    fire_at: NaiveTime,
    offset: FixedOffset,
}

/// Handle for stopping a running trigger.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the trigger and wait for it to finish. A tick already in
    /// progress completes first.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Scheduler task ended abnormally");
        }
    }
}

impl ScheduledArchiveTrigger {
    #[must_use]
    pub const fn new(fire_at: NaiveTime, offset: FixedOffset) -> Self {
        Self { fire_at, offset }
    }

    /// First fire instant strictly after `now`.
    #[must_use]
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = now.with_timezone(&self.offset).naive_local();
        let mut candidate = local.date().and_time(self.fire_at);
        if candidate <= local {
            candidate += TimeDelta::days(1);
        }
        (candidate - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }

    /// Day key a tick at `at` archives: the local day it fires on.
    #[must_use]
    pub fn day_for(&self, at: DateTime<Utc>) -> DayKey {
        DayKey::at(at, self.offset)
    }

    /// Run the trigger on the current runtime until the handle is shut down.
    pub fn spawn<T>(self, tick: Arc<T>) -> SchedulerHandle
    where
        T: DailyTick + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(tick.as_ref(), shutdown_rx).await });
        SchedulerHandle { shutdown_tx, task }
    }

    /// Sleep until each fire time and tick, until `shutdown` flips to true.
    pub async fn run<T: DailyTick>(&self, tick: &T, mut shutdown: watch::Receiver<bool>) {
        let mut last_day: Option<DayKey> = None;
        info!(at = %self.fire_at, offset = %self.offset, "Daily archive scheduled");

        loop {
            let now = Utc::now();
            let next = self.next_fire_after(now);
            let wait = (next - now).to_std().unwrap_or_default();
            debug!(next = %next, "Waiting for next archive tick");

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Archive scheduler shutting down");
                        return;
                    }
                }
                () = tokio::time::sleep(wait) => {
                    let day = self.day_for(next);
                    if last_day == Some(day) {
                        continue;
                    }
                    info!(day = %day, "Archive tick");
                    tick.on_daily_tick(day).await;
                    last_day = Some(day);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::TimeZone;

    use super::*;

    fn bangkok() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn trigger(h: u32, m: u32) -> ScheduledArchiveTrigger {
        ScheduledArchiveTrigger::new(NaiveTime::from_hms_opt(h, m, 0).unwrap(), bangkok())
    }

    #[test]
    fn fires_later_the_same_local_day() {
        // 10:00 in Bangkok.
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 3, 0, 0).unwrap();
        let next = trigger(23, 59).next_fire_after(now);

        assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 2, 16, 59, 0).unwrap());
        assert_eq!(trigger(23, 59).day_for(next).to_string(), "2026-03-02");
    }

    #[test]
    fn fires_tomorrow_once_the_time_has_passed() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 16, 59, 0).unwrap();
        let next = trigger(23, 59).next_fire_after(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 3, 16, 59, 0).unwrap());
    }

    #[test]
    fn local_midnight_crosses_the_utc_date() {
        // 05:00 UTC on the 2nd is already past 00:30 Bangkok on the 2nd.
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 5, 0, 0).unwrap();
        let next = trigger(0, 30).next_fire_after(now);

        assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 2, 17, 30, 0).unwrap());
        assert_eq!(trigger(0, 30).day_for(next).to_string(), "2026-03-03");
    }

    struct CountingTick(AtomicUsize);

    impl DailyTick for CountingTick {
        async fn on_daily_tick(&self, _day: DayKey) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn shutdown_stops_a_waiting_trigger() {
        let tick = Arc::new(CountingTick(AtomicUsize::new(0)));
        let now = Utc::now().with_timezone(&bangkok()).time();
        // An hour from now, so the trigger is asleep when we stop it.
        let fire_at = now + TimeDelta::hours(1);
        let handle = ScheduledArchiveTrigger::new(fire_at, bangkok()).spawn(Arc::clone(&tick));

        tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("scheduler should stop promptly");
        assert_eq!(tick.0.load(Ordering::SeqCst), 0);
    }
}
