//! Daily scheduler callback.

use std::future::Future;

use crate::domain::day::DayKey;

/// Receiver of the once-a-day tick.
///
/// The scheduler passes only the day key and ignores the outcome, so
/// implementations log their own failures.
pub trait DailyTick: Send + Sync {
    fn on_daily_tick(&self, day: DayKey) -> impl Future<Output = ()> + Send;
}
