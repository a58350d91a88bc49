//! Optional background eviction of expired sessions.
//!
//! Off by default. Without it, an expired session is removed only when
//! someone presents its token again (see [`Gate::authenticate`]), so
//! sessions that are simply abandoned accumulate for the life of the
//! process. Turning the sweeper on bounds memory by the TTL instead.
//!
//! [`Gate::authenticate`]: crate::Gate::authenticate

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::{Clock, SessionError, SharedSessions};

/// Spawns a task that evicts expired sessions every `every`.
///
/// Expiry is judged by `clock`, not by the timer, so a [`ManualClock`]
/// controls which sessions the sweep considers stale. Missed ticks are
/// skipped rather than replayed. The task runs until the returned handle is
/// aborted or the runtime shuts down.
///
/// # Errors
/// Returns [`SessionError::InvalidConfig`] if `every` is zero.
///
/// [`ManualClock`]: crate::ManualClock
pub fn spawn_sweeper<C: Clock>(
    sessions: SharedSessions,
    clock: C,
    every: Duration,
) -> Result<JoinHandle<()>, SessionError> {
    if every.is_zero() {
        return Err(SessionError::InvalidConfig(
            "sweep interval must be greater than zero".into(),
        ));
    }

    tracing::info!(interval_ms = every.as_millis() as u64, "session sweeper started");

    Ok(tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let now = clock.now();
            let evicted = sessions.lock().await.evict_expired(now);
            if !evicted.is_empty() {
                tracing::info!(count = evicted.len(), "swept expired sessions");
            }
        }
    }))
}
