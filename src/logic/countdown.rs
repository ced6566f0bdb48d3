//! Countdown arithmetic and the recurring tick that drives a live countdown.

use crate::models::{Countdown, Deadline};
use actix_web::rt::task::JoinHandle;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Cadence of a live countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Time left until `deadline` as seen at `now`; all zeros once the deadline has passed.
pub fn remaining(deadline: Deadline, now: DateTime<Utc>) -> Countdown {
    Countdown::from_millis((deadline.instant() - now).num_milliseconds())
}

/// A callback run on a fixed period on the current actix runtime.
///
/// The first tick fires immediately. The task is aborted by [`CountdownTimer::stop`] or when the
/// timer is dropped, so a timer owned by a view stops with it.
pub struct CountdownTimer {
    handle: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    /// Spawn the recurring task. Must be called from within an actix (or tokio local) runtime.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let handle = actix_web::rt::spawn(async move {
            let mut interval = actix_web::rt::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Stop ticking. Calling it again is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log::debug!("Countdown timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
