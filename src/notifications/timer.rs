//! Auto-dismiss timers
//!
//! Single-fire, cancellable timers built on `tokio::time` and
//! `CancellationToken`. A zero duration produces a disabled handle rather
//! than an immediate fire, so "no auto-dismiss" and "dismiss now" can never
//! be confused.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Handle to a scheduled (or disabled) timer.
///
/// Dropping the handle cancels the timer; cancellation after the timer has
/// fired is a harmless no-op.
#[derive(Debug)]
pub struct TimerHandle {
    token: CancellationToken,
    started_at: Instant,
    duration: Duration,
}

impl TimerHandle {
    fn armed(token: CancellationToken, duration: Duration) -> Self {
        Self {
            token,
            started_at: Instant::now(),
            duration,
        }
    }

    /// Handle that never fires. Used for zero durations.
    pub fn disabled() -> Self {
        let token = CancellationToken::new();
        token.cancel();
        Self {
            token,
            started_at: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_armed(&self) -> bool {
        !self.duration.is_zero() && !self.token.is_cancelled()
    }

    /// Elapsed fraction of the timeout in `[0, 1]`.
    ///
    /// Purely presentational (drives `show_progress` UIs); never use it to
    /// infer whether the timer has fired.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.started_at.elapsed().as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Schedules single-fire callbacks.
pub struct TimerService;

impl TimerService {
    /// Run `on_fire` after `duration` unless the returned handle is
    /// cancelled first. A zero duration disables the timer entirely.
    pub fn schedule<F>(duration: Duration, on_fire: F) -> TimerHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if duration.is_zero() {
            return TimerHandle::disabled();
        }

        let token = CancellationToken::new();
        let task_token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    on_fire.await;
                }
            }
        });
        TimerHandle::armed(token, duration)
    }
}
