//! Periodic background eviction of expired entries

use crate::cache::TtlCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

/// Default period between sweeps (5 minutes)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Spawn a task that calls [`TtlCache::sweep`] every `period`
///
/// The first sweep runs one full period after the call. The task runs until
/// the returned handle is aborted or the runtime shuts down.
pub fn spawn_sweeper<V>(cache: Arc<TtlCache<V>>, period: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    info!(period_secs = period.as_secs(), "Starting cache sweeper");

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            cache.sweep().await;
        }
    })
}
