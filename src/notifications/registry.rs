//! Notification Registry
//!
//! Central owner of all active notifications. The registry holds the
//! insertion-ordered sequence, enforces the visible-capacity limit, and is
//! the only code allowed to mutate a notification's `visible` flag and
//! lifecycle state. Timers, swipe releases, and explicit calls all converge
//! on [`hide`](NotificationRegistry::hide), which uses the lifecycle state
//! as the single source of truth so racing triggers collapse to one exit.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::notifications::swipe;
use crate::notifications::timer::{TimerHandle, TimerService};
use crate::notifications::transition::{ImmediateTransitions, TransitionExecutor};
use crate::notifications::types::{
    Category, LifecycleState, Notification, NotificationConfig, NotificationId, NotificationPatch,
};

/// Runtime bookkeeping the registry keeps next to each record: the
/// entrance cancellation token and the armed auto-dismiss timer, if any.
struct EntryRuntime {
    entrance: CancellationToken,
    timer: Option<TimerHandle>,
}

struct Entry {
    notification: Notification,
    runtime: EntryRuntime,
}

impl Entry {
    fn new(notification: Notification) -> Self {
        Self {
            notification,
            runtime: EntryRuntime {
                entrance: CancellationToken::new(),
                timer: None,
            },
        }
    }

    fn is_live(&self) -> bool {
        self.notification.state().is_live()
    }
}

#[derive(Default)]
struct RegistryInner {
    /// Insertion order, oldest first. Entries pending removal (`Exiting`)
    /// stay in place until their exit transition resolves.
    entries: Vec<Entry>,
}

impl RegistryInner {
    fn find_live(&self, id: &NotificationId) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.notification.id() == id && e.is_live())
    }

    fn find_live_mut(&mut self, id: &NotificationId) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.notification.id() == id && e.is_live())
    }
}

/// The owning collection and lifecycle driver for all active notifications.
///
/// Cheaply cloneable; clones share the same underlying sequence. Create one
/// at application start and hand clones to whatever needs to raise
/// notifications.
pub struct NotificationRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    config: EngineConfig,
    transitions: Arc<dyn TransitionExecutor>,
}

impl NotificationRegistry {
    /// Registry with instantly-resolving transitions.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_transitions(config, Arc::new(ImmediateTransitions))
    }

    /// Registry driving the given transition executor.
    pub fn with_transitions(config: EngineConfig, transitions: Arc<dyn TransitionExecutor>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
            config,
            transitions,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Insert a new notification and start its entrance.
    ///
    /// Returns the id as soon as the entry is registered; the entrance
    /// transition runs asynchronously. If the visible count exceeds
    /// `max_visible` after insertion, the oldest other visible entry is
    /// evicted through the normal hide path. A live entry under the same
    /// caller-supplied id is replaced (hidden first).
    pub async fn show(&self, config: NotificationConfig) -> NotificationId {
        let id = config
            .id
            .clone()
            .unwrap_or_else(NotificationId::generate);

        if self.contains(&id).await {
            warn!("notification '{}' is already live, replacing it", id);
            self.hide(&id).await;
        }

        let duration = self.resolve_duration(&config);
        let notification = Notification::new(id.clone(), config, duration);
        debug!(
            "showing notification '{}' ({}, {:?} auto-dismiss)",
            id,
            notification.category(),
            duration
        );

        let evict = {
            let mut inner = self.inner.write().await;
            inner.entries.push(Entry::new(notification));

            let visible = inner.entries.iter().filter(|e| e.notification.visible()).count();
            if visible > self.config.max_visible {
                inner
                    .entries
                    .iter()
                    .find(|e| e.notification.visible() && e.notification.id() != &id)
                    .map(|e| e.notification.id().clone())
            } else {
                None
            }
        };

        if let Some(victim) = evict {
            debug!(
                "visible capacity {} exceeded, evicting oldest '{}'",
                self.config.max_visible, victim
            );
            self.hide(&victim).await;
        }

        self.spawn_entrance(id.clone()).await;
        id
    }

    /// Request dismissal. Idempotent: unknown ids and entries already
    /// exiting are silent no-ops, which makes timer/gesture/explicit races
    /// harmless. Returns whether an exit was initiated.
    pub async fn hide(&self, id: &NotificationId) -> bool {
        let (snapshot, was_entering) = {
            let mut inner = self.inner.write().await;
            let Some(entry) = inner.find_live_mut(id) else {
                debug!("hide: '{}' not live, ignoring", id);
                return false;
            };

            let was_entering = entry.notification.state() == LifecycleState::Entering;
            if let Some(timer) = entry.runtime.timer.take() {
                timer.cancel();
            }
            if was_entering {
                entry.runtime.entrance.cancel();
            }
            entry.notification.set_visible(false);
            entry.notification.set_state(LifecycleState::Exiting);
            (entry.notification.clone(), was_entering)
        };

        if was_entering {
            // Exit starts from whatever partial state the entrance reached;
            // queuing both transitions would build an animation backlog.
            self.transitions.cancel(&snapshot);
        }
        debug!("notification '{}' exiting", id);

        let registry = self.clone();
        let transitions = Arc::clone(&self.transitions);
        tokio::spawn(async move {
            transitions.exit(&snapshot).await;
            registry.finish_exit(snapshot.id()).await;
        });
        true
    }

    /// Hide every live notification. Each exits independently; completion
    /// order follows the individual exit transitions.
    pub async fn hide_all(&self) {
        let ids: Vec<NotificationId> = {
            let inner = self.inner.read().await;
            inner
                .entries
                .iter()
                .filter(|e| e.is_live())
                .map(|e| e.notification.id().clone())
                .collect()
        };
        debug!("hiding all {} live notifications", ids.len());
        join_all(ids.iter().map(|id| self.hide(id))).await;
    }

    /// Merge a partial configuration into a live notification.
    ///
    /// The auto-dismiss timer restarts only when the patch carries a
    /// duration different from the current one; everything else leaves the
    /// lifecycle untouched. Unknown ids are silent no-ops.
    pub async fn update(&self, id: &NotificationId, patch: NotificationPatch) -> bool {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.find_live_mut(id) else {
            debug!("update: '{}' not live, ignoring", id);
            return false;
        };

        let new_duration = patch.duration_ms.map(clamp_duration_ms);
        entry.notification.apply_patch(patch);

        if let Some(duration) = new_duration {
            if duration != entry.notification.duration() {
                entry.notification.set_duration(duration);
                if let Some(timer) = entry.runtime.timer.take() {
                    timer.cancel();
                }
                if entry.notification.state() == LifecycleState::Visible {
                    entry.runtime.timer = self.schedule_auto_dismiss(&entry.notification);
                }
                debug!("update: duration changed, timer restarted for '{}'", id);
            }
        }
        true
    }

    /// Sample a drag delta against the notification's anchored edge.
    ///
    /// Only applies while the notification is `Visible` and configured for
    /// swipe dismissal; otherwise returns 0. The stored progress is both
    /// the presentational value and the input to [`swipe_release`].
    ///
    /// [`swipe_release`]: NotificationRegistry::swipe_release
    pub async fn swipe_move(&self, id: &NotificationId, dx: f64, dy: f64) -> f64 {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.find_live_mut(id) else {
            return 0.0;
        };
        let n = &mut entry.notification;
        if n.state() != LifecycleState::Visible || !n.config().swipe_to_dismiss {
            return 0.0;
        }
        let progress = swipe::dismiss_progress(dx, dy, n.position());
        n.set_swipe_progress(progress);
        progress
    }

    /// Release the drag: past the threshold the notification is dismissed,
    /// below it snaps back with no state change. Returns whether an exit
    /// was initiated.
    pub async fn swipe_release(&self, id: &NotificationId) -> bool {
        let progress = {
            let mut inner = self.inner.write().await;
            let Some(entry) = inner.find_live_mut(id) else {
                return false;
            };
            let n = &mut entry.notification;
            if n.state() != LifecycleState::Visible || !n.config().swipe_to_dismiss {
                return false;
            }
            let progress = n.swipe_progress();
            if !swipe::crosses_threshold(progress) {
                n.set_swipe_progress(0.0);
                return false;
            }
            progress
        };

        debug!("swipe released at {:.2}, dismissing '{}'", progress, id);
        self.hide(id).await
    }

    /// Body tap: runs the configured `on_press` hook, otherwise hides the
    /// notification when it is dismissible.
    pub async fn press(&self, id: &NotificationId) {
        let (on_press, dismissible, snapshot) = {
            let inner = self.inner.read().await;
            let Some(entry) = inner.find_live(id) else {
                return;
            };
            let n = &entry.notification;
            (n.config().on_press.clone(), n.config().dismissible, n.clone())
        };

        if let Some(hook) = on_press {
            hook(&snapshot);
        } else if dismissible {
            self.hide(id).await;
        }
    }

    /// Press the notification's action button. Runs the handler when the
    /// action exists and is enabled; never dismisses by itself. Handler
    /// panics propagate to the caller; the handler runs outside any lock,
    /// so the sequence stays consistent.
    pub async fn press_action(&self, id: &NotificationId) {
        let handler = {
            let inner = self.inner.read().await;
            let Some(entry) = inner.find_live(id) else {
                return;
            };
            match &entry.notification.config().action {
                Some(action) if !action.disabled => Some(action.handler.clone()),
                _ => None,
            }
        };

        if let Some(handler) = handler {
            handler();
        }
    }

    /// Snapshot of every entry still in the sequence, insertion order.
    pub async fn notifications(&self) -> Vec<Notification> {
        let inner = self.inner.read().await;
        inner.entries.iter().map(|e| e.notification.clone()).collect()
    }

    /// Snapshot of the currently visible entries, insertion order.
    pub async fn visible(&self) -> Vec<Notification> {
        let inner = self.inner.read().await;
        inner
            .entries
            .iter()
            .filter(|e| e.notification.visible())
            .map(|e| e.notification.clone())
            .collect()
    }

    pub async fn visible_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.entries.iter().filter(|e| e.notification.visible()).count()
    }

    /// Number of entries in the sequence, including those pending removal.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    /// Whether a live (entering or visible) entry exists under this id.
    pub async fn contains(&self, id: &NotificationId) -> bool {
        self.inner.read().await.find_live(id).is_some()
    }

    /// Presentational elapsed fraction of the auto-dismiss timeout in
    /// `[0, 1]`; 0 when no timer is armed. `None` for unknown ids.
    pub async fn timeout_progress(&self, id: &NotificationId) -> Option<f64> {
        let inner = self.inner.read().await;
        inner
            .find_live(id)
            .map(|e| e.runtime.timer.as_ref().map_or(0.0, TimerHandle::progress))
    }

    /// Drive the entrance transition on its own task. The entrance token
    /// lets `hide` abandon it mid-flight.
    async fn spawn_entrance(&self, id: NotificationId) {
        let (snapshot, token) = {
            let inner = self.inner.read().await;
            match inner.find_live(&id) {
                Some(entry) => (entry.notification.clone(), entry.runtime.entrance.clone()),
                None => return,
            }
        };

        let registry = self.clone();
        let transitions = Arc::clone(&self.transitions);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = transitions.enter(&snapshot) => {
                    registry.finish_entrance(&id).await;
                }
            }
        });
    }

    /// `Entering → Visible`: arms the auto-dismiss timer and fires
    /// `on_show`. A hide that won the race leaves the state non-`Entering`
    /// and this becomes a no-op.
    async fn finish_entrance(&self, id: &NotificationId) {
        let (hook, snapshot) = {
            let mut inner = self.inner.write().await;
            let Some(entry) = inner.find_live_mut(id) else {
                return;
            };
            if entry.notification.state() != LifecycleState::Entering {
                return;
            }
            entry.notification.set_state(LifecycleState::Visible);
            entry.runtime.timer = self.schedule_auto_dismiss(&entry.notification);
            debug!("notification '{}' visible", id);
            (entry.notification.config().on_show.clone(), entry.notification.clone())
        };

        if let Some(hook) = hook {
            hook(&snapshot);
        }
    }

    /// `Exiting → Removed`: purge the entry and fire `on_hide`/`on_dismiss`.
    /// Removal never happens before this point.
    async fn finish_exit(&self, id: &NotificationId) {
        let removed = {
            let mut inner = self.inner.write().await;
            let Some(position) = inner
                .entries
                .iter()
                .position(|e| e.notification.id() == id && e.notification.state() == LifecycleState::Exiting)
            else {
                return;
            };
            let mut entry = inner.entries.remove(position);
            entry.notification.set_state(LifecycleState::Removed);
            entry.notification
        };

        debug!("notification '{}' removed", id);
        if let Some(hook) = removed.config().on_hide.clone() {
            hook(&removed);
        }
        if let Some(hook) = removed.config().on_dismiss.clone() {
            hook(&removed);
        }
    }

    fn schedule_auto_dismiss(&self, notification: &Notification) -> Option<TimerHandle> {
        if !notification.auto_dismisses() {
            return None;
        }
        let registry = self.clone();
        let id = notification.id().clone();
        Some(TimerService::schedule(notification.duration(), async move {
            debug!("auto-dismiss timer fired for '{}'", id);
            registry.hide(&id).await;
        }))
    }

    fn resolve_duration(&self, config: &NotificationConfig) -> Duration {
        match config.duration_ms {
            Some(ms) => clamp_duration_ms(ms),
            None if config.category == Category::Error => self.config.error_duration(),
            None => self.config.default_duration(),
        }
    }
}

impl Clone for NotificationRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
            transitions: Arc::clone(&self.transitions),
        }
    }
}

/// Negative or garbage durations degrade to "no auto-dismiss" instead of
/// being rejected; a notification system must not be a source of errors.
fn clamp_duration_ms(ms: i64) -> Duration {
    if ms < 0 {
        warn!("negative duration {}ms clamped to 0 (auto-dismiss disabled)", ms);
        Duration::ZERO
    } else {
        Duration::from_millis(ms as u64)
    }
}
