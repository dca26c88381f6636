//! Visual transition seam
//!
//! The engine never draws anything. It drives an implementation of
//! [`TransitionExecutor`] and awaits its enter/exit futures; the state
//! machine advances only when those futures resolve. Slide-type executors
//! derive their direction of travel from the notification's position via
//! [`SlideDirection`](crate::notifications::types::SlideDirection).

use async_trait::async_trait;

use crate::notifications::types::Notification;

/// Performs the visual entrance and exit animations for a notification.
///
/// `enter`/`exit` resolve when the animation completes. `cancel` is a
/// best-effort synchronous stop of an in-flight transition; the registry
/// follows it immediately with `exit`, so an executor may simply leave the
/// visual wherever it was.
#[async_trait]
pub trait TransitionExecutor: Send + Sync {
    async fn enter(&self, notification: &Notification);

    async fn exit(&self, notification: &Notification);

    fn cancel(&self, _notification: &Notification) {}
}

/// Executor that resolves every transition immediately.
///
/// The default for headless use and the baseline for tests: lifecycle
/// ordering guarantees hold regardless of animation timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTransitions;

#[async_trait]
impl TransitionExecutor for ImmediateTransitions {
    async fn enter(&self, _notification: &Notification) {}

    async fn exit(&self, _notification: &Notification) {}
}
