//! Lifecycle tests for the notification subsystem
//!
//! All timer-sensitive tests run with a paused tokio clock so sleeps are
//! deterministic auto-advances, not wall-clock waits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::notifications::registry::NotificationRegistry;
use crate::notifications::transition::TransitionExecutor;
use crate::notifications::types::{
    Category, LifecycleState, Notification, NotificationConfig, NotificationId, NotificationPatch,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum TransitionEvent {
    Entered(String),
    Exited(String),
    Cancelled(String),
}

/// Transition executor that records completions, with optional delays to
/// open race windows.
struct RecordingTransitions {
    events: Mutex<Vec<TransitionEvent>>,
    enter_delay: Duration,
    exit_delay: Duration,
}

impl RecordingTransitions {
    fn instant() -> Arc<Self> {
        Self::with_delays(Duration::ZERO, Duration::ZERO)
    }

    fn with_delays(enter_delay: Duration, exit_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            enter_delay,
            exit_delay,
        })
    }

    fn events(&self) -> Vec<TransitionEvent> {
        self.events.lock().unwrap().clone()
    }

    fn exit_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, TransitionEvent::Exited(_)))
            .count()
    }
}

#[async_trait]
impl TransitionExecutor for RecordingTransitions {
    async fn enter(&self, notification: &Notification) {
        if !self.enter_delay.is_zero() {
            tokio::time::sleep(self.enter_delay).await;
        }
        self.events
            .lock()
            .unwrap()
            .push(TransitionEvent::Entered(notification.id().to_string()));
    }

    async fn exit(&self, notification: &Notification) {
        if !self.exit_delay.is_zero() {
            tokio::time::sleep(self.exit_delay).await;
        }
        self.events
            .lock()
            .unwrap()
            .push(TransitionEvent::Exited(notification.id().to_string()));
    }

    fn cancel(&self, notification: &Notification) {
        self.events
            .lock()
            .unwrap()
            .push(TransitionEvent::Cancelled(notification.id().to_string()));
    }
}

fn registry_with(max_visible: usize, executor: Arc<RecordingTransitions>) -> NotificationRegistry {
    NotificationRegistry::with_transitions(
        EngineConfig::default().with_max_visible(max_visible),
        executor,
    )
}

/// Let spawned lifecycle tasks run (paused clock auto-advances).
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

fn counting_hook(counter: Arc<AtomicUsize>) -> impl Fn(&Notification) + Send + Sync + 'static {
    move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test(start_paused = true)]
async fn test_show_enters_then_becomes_visible() {
    let executor = RecordingTransitions::instant();
    let registry = registry_with(3, executor.clone());

    let id = registry.show(NotificationConfig::new("hi")).await;

    // The entrance runs on its own task; the state is still Entering until
    // the executor resolves.
    let snapshot = &registry.notifications().await[0];
    assert_eq!(snapshot.state(), LifecycleState::Entering);
    assert!(snapshot.visible());

    settle().await;
    let snapshot = &registry.notifications().await[0];
    assert_eq!(snapshot.state(), LifecycleState::Visible);
    assert_eq!(executor.events(), vec![TransitionEvent::Entered(id.to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_on_show_fires_when_entrance_resolves() {
    let registry = registry_with(3, RecordingTransitions::instant());
    let shown = Arc::new(AtomicUsize::new(0));

    registry
        .show(NotificationConfig::new("hi").on_show(counting_hook(shown.clone())))
        .await;
    assert_eq!(shown.load(Ordering::SeqCst), 0);

    settle().await;
    assert_eq!(shown.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_visible_count_never_exceeds_capacity() {
    let registry = registry_with(3, RecordingTransitions::instant());

    for i in 0..6 {
        registry
            .show(NotificationConfig::new(format!("n{i}")).with_duration_ms(0))
            .await;
        assert!(registry.visible_count().await <= 3);
    }
}

#[tokio::test(start_paused = true)]
async fn test_capacity_evicts_oldest_visible_first() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(
            registry
                .show(NotificationConfig::new(format!("n{i}")).with_duration_ms(0))
                .await,
        );
        settle().await;
    }

    // Four sequential shows: exactly 3 visible, the first evicted and
    // removed once its exit resolved.
    assert_eq!(registry.visible_count().await, 3);
    assert_eq!(registry.len().await, 3);
    assert!(!registry.contains(&ids[0]).await);

    let remaining: Vec<NotificationId> = registry
        .notifications()
        .await
        .iter()
        .map(|n| n.id().clone())
        .collect();
    assert_eq!(remaining, ids[1..].to_vec());
}

#[tokio::test(start_paused = true)]
async fn test_insertion_order_survives_out_of_order_exits() {
    let registry = registry_with(5, RecordingTransitions::instant());

    let a = registry.show(NotificationConfig::new("a").with_duration_ms(0)).await;
    let b = registry.show(NotificationConfig::new("b").with_duration_ms(0)).await;
    let c = registry.show(NotificationConfig::new("c").with_duration_ms(0)).await;
    settle().await;

    registry.hide(&b).await;
    settle().await;

    let order: Vec<NotificationId> = registry
        .notifications()
        .await
        .iter()
        .map(|n| n.id().clone())
        .collect();
    assert_eq!(order, vec![a, c]);
}

#[tokio::test(start_paused = true)]
async fn test_hide_is_idempotent() {
    let executor = RecordingTransitions::with_delays(Duration::ZERO, Duration::from_millis(50));
    let registry = registry_with(3, executor.clone());
    let hidden = Arc::new(AtomicUsize::new(0));
    let dismissed = Arc::new(AtomicUsize::new(0));

    let id = registry
        .show(
            NotificationConfig::new("hi")
                .with_duration_ms(0)
                .on_hide(counting_hook(hidden.clone()))
                .on_dismiss(counting_hook(dismissed.clone())),
        )
        .await;
    settle().await;

    assert!(registry.hide(&id).await);
    assert!(!registry.hide(&id).await);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(executor.exit_count(), 1);
    assert_eq!(hidden.load(Ordering::SeqCst), 1);
    assert_eq!(dismissed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_no_removal_before_exit_resolves() {
    let executor = RecordingTransitions::with_delays(Duration::ZERO, Duration::from_millis(50));
    let registry = registry_with(3, executor);

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(0)).await;
    settle().await;
    registry.hide(&id).await;

    // Still in the sequence while the exit animation runs, just not visible.
    assert_eq!(registry.len().await, 1);
    assert_eq!(registry.visible_count().await, 0);
    assert_eq!(
        registry.notifications().await[0].state(),
        LifecycleState::Exiting
    );

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(registry.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_callbacks_fire_at_removal_not_at_hide_call() {
    let executor = RecordingTransitions::with_delays(Duration::ZERO, Duration::from_millis(50));
    let registry = registry_with(3, executor);
    let dismissed = Arc::new(AtomicUsize::new(0));

    let id = registry
        .show(
            NotificationConfig::new("hi")
                .with_duration_ms(0)
                .on_dismiss(counting_hook(dismissed.clone())),
        )
        .await;
    settle().await;

    registry.hide(&id).await;
    assert_eq!(dismissed.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(dismissed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_hide_while_entering_substitutes_exit() {
    let executor = RecordingTransitions::with_delays(Duration::from_millis(100), Duration::ZERO);
    let registry = registry_with(3, executor.clone());
    let shown = Arc::new(AtomicUsize::new(0));

    let id = registry
        .show(NotificationConfig::new("hi").on_show(counting_hook(shown.clone())))
        .await;
    assert!(registry.hide(&id).await);
    settle().await;

    // Entrance was cancelled, the exit ran, on_show never fired.
    assert!(registry.is_empty().await);
    assert_eq!(shown.load(Ordering::SeqCst), 0);
    assert_eq!(
        executor.events(),
        vec![
            TransitionEvent::Cancelled(id.to_string()),
            TransitionEvent::Exited(id.to_string()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_hide_all_handles_mixed_states() {
    let executor = RecordingTransitions::with_delays(Duration::from_millis(100), Duration::ZERO);
    let registry = registry_with(5, executor);

    let settled = registry.show(NotificationConfig::new("a").with_duration_ms(0)).await;
    tokio::time::sleep(Duration::from_millis(150)).await; // entrance resolves
    let entering = registry.show(NotificationConfig::new("b").with_duration_ms(0)).await;

    registry.hide_all().await;
    settle().await;

    assert!(!registry.contains(&settled).await);
    assert!(!registry.contains(&entering).await);
    assert!(registry.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_auto_dismiss_uses_category_durations() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let error = registry.error("oops").await;
    let info = registry.info("hey").await;
    settle().await;

    // Info falls to the 4000ms default, error to 6000ms.
    tokio::time::sleep(Duration::from_millis(4500)).await;
    assert!(!registry.contains(&info).await);
    assert!(registry.contains(&error).await);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert!(!registry.contains(&error).await);
}

#[tokio::test(start_paused = true)]
async fn test_zero_duration_never_auto_dismisses() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(0)).await;
    settle().await;

    tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
    assert!(registry.contains(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_negative_duration_clamps_to_no_dismiss() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(-500)).await;
    settle().await;

    assert_eq!(registry.notifications().await[0].duration(), Duration::ZERO);
    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert!(registry.contains(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_hide_cancels_pending_timer() {
    let executor = RecordingTransitions::instant();
    let registry = registry_with(3, executor.clone());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(100)).await;
    settle().await;
    registry.hide(&id).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    // The timer must not produce a second exit on the removed entry.
    assert_eq!(executor.exit_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timer_fire_then_hide_is_noop() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(100)).await;
    settle().await;

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!registry.contains(&id).await);
    assert!(!registry.hide(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_update_merges_without_touching_timer() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("old").with_duration_ms(4000)).await;
    settle().await;

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert!(registry.update(&id, NotificationPatch::new().message("new")).await);
    assert_eq!(registry.notifications().await[0].message(), "new");

    // The original timer keeps running: 4000ms after arming, not after
    // the update.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(!registry.contains(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_update_with_changed_duration_restarts_timer() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(4000)).await;
    settle().await;

    tokio::time::sleep(Duration::from_millis(2000)).await;
    registry.update(&id, NotificationPatch::new().duration_ms(6000)).await;

    // Old deadline (4000 after arming) passes without a dismissal.
    tokio::time::sleep(Duration::from_millis(4000)).await;
    assert!(registry.contains(&id).await);

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(!registry.contains(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_update_with_same_duration_keeps_timer() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(4000)).await;
    settle().await;

    tokio::time::sleep(Duration::from_millis(2000)).await;
    registry.update(&id, NotificationPatch::new().duration_ms(4000)).await;

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(!registry.contains(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_update_unknown_id_is_noop() {
    let registry = registry_with(3, RecordingTransitions::instant());
    let ghost = NotificationId::from("ghost");
    assert!(!registry.update(&ghost, NotificationPatch::new().message("x")).await);
    assert!(!registry.hide(&ghost).await);
}

#[tokio::test(start_paused = true)]
async fn test_swipe_release_below_threshold_snaps_back() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(0)).await;
    settle().await;

    let progress = registry.swipe_move(&id, 0.0, 29.0).await;
    assert!(progress < 0.3);
    assert!(!registry.swipe_release(&id).await);

    let snapshot = &registry.notifications().await[0];
    assert_eq!(snapshot.state(), LifecycleState::Visible);
    assert_eq!(snapshot.swipe_progress(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_swipe_release_past_threshold_dismisses() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(0)).await;
    settle().await;

    let progress = registry.swipe_move(&id, 0.0, 31.0).await;
    assert!(progress >= 0.3);
    assert!(registry.swipe_release(&id).await);

    settle().await;
    assert!(registry.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_swipe_ignored_while_entering_or_disabled() {
    let executor = RecordingTransitions::with_delays(Duration::from_millis(100), Duration::ZERO);
    let registry = registry_with(3, executor);

    let entering = registry.show(NotificationConfig::new("a")).await;
    assert_eq!(registry.swipe_move(&entering, 0.0, 80.0).await, 0.0);
    assert!(!registry.swipe_release(&entering).await);

    tokio::time::sleep(Duration::from_millis(150)).await;
    let fixed = registry
        .show(NotificationConfig::new("b").with_duration_ms(0).swipe_to_dismiss(false))
        .await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(registry.swipe_move(&fixed, 0.0, 80.0).await, 0.0);
    assert!(!registry.swipe_release(&fixed).await);
}

#[tokio::test(start_paused = true)]
async fn test_press_hides_dismissible_notification() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.show(NotificationConfig::new("hi").with_duration_ms(0)).await;
    settle().await;

    registry.press(&id).await;
    settle().await;
    assert!(registry.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_custom_on_press_replaces_dismissal() {
    let registry = registry_with(3, RecordingTransitions::instant());
    let pressed = Arc::new(AtomicUsize::new(0));

    let id = registry
        .show(
            NotificationConfig::new("hi")
                .with_duration_ms(0)
                .on_press(counting_hook(pressed.clone())),
        )
        .await;
    settle().await;

    registry.press(&id).await;
    settle().await;
    assert_eq!(pressed.load(Ordering::SeqCst), 1);
    assert!(registry.contains(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_action_press_runs_handler_without_dismissing() {
    let registry = registry_with(3, RecordingTransitions::instant());
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = invoked.clone();

    let id = registry
        .show(
            NotificationConfig::new("hi")
                .with_duration_ms(0)
                .with_action(crate::notifications::types::NotificationAction::new(
                    "retry",
                    move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    },
                )),
        )
        .await;
    settle().await;

    registry.press_action(&id).await;
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
    assert!(registry.contains(&id).await);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_action_is_not_invoked() {
    let registry = registry_with(3, RecordingTransitions::instant());
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = invoked.clone();

    let id = registry
        .show(
            NotificationConfig::new("hi").with_duration_ms(0).with_action(
                crate::notifications::types::NotificationAction::new("retry", move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .disabled(),
            ),
        )
        .await;
    settle().await;

    registry.press_action(&id).await;
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_loading_is_sticky() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry.loading("working...").await;
    settle().await;

    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert!(registry.contains(&id).await);

    registry.press(&id).await;
    assert_eq!(registry.swipe_move(&id, 0.0, 90.0).await, 0.0);
    assert!(!registry.swipe_release(&id).await);
    settle().await;
    assert!(registry.contains(&id).await);

    // Explicit hide is the only way out.
    assert!(registry.hide(&id).await);
    settle().await;
    assert!(registry.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_promise_success_round_trip() {
    use crate::notifications::facade::{PromiseMessage, PromiseOutcome};

    let registry = registry_with(3, RecordingTransitions::instant());

    let result: Result<i32, String> = registry
        .promise(
            async { Ok(42) },
            PromiseOutcome::new(
                "loading...",
                PromiseMessage::from_value(|v: &i32| format!("got {v}")),
                "failed",
            ),
        )
        .await;
    settle().await;

    assert_eq!(result, Ok(42));
    let remaining = registry.notifications().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].message(), "got 42");
    assert_eq!(remaining[0].category(), Category::Success);
}

#[tokio::test(start_paused = true)]
async fn test_promise_rejection_notifies_and_rethrows() {
    use crate::notifications::facade::{PromiseMessage, PromiseOutcome};

    let registry = registry_with(3, RecordingTransitions::instant());

    let result: Result<i32, String> = registry
        .promise(
            async { Err("x".to_string()) },
            PromiseOutcome::new(
                "loading...",
                PromiseMessage::text("done"),
                PromiseMessage::from_value(|e: &String| format!("error: {e}")),
            ),
        )
        .await;
    settle().await;

    assert_eq!(result, Err("x".to_string()));
    let remaining = registry.notifications().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].message(), "error: x");
    assert_eq!(remaining[0].category(), Category::Error);
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_id_replaces_live_entry() {
    let registry = registry_with(3, RecordingTransitions::instant());

    registry
        .show(NotificationConfig::new("first").with_id("job-1").with_duration_ms(0))
        .await;
    settle().await;

    let id = registry
        .show(NotificationConfig::new("second").with_id("job-1").with_duration_ms(0))
        .await;
    settle().await;

    let remaining = registry.notifications().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id(), &id);
    assert_eq!(remaining[0].message(), "second");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_progress_is_presentational() {
    let registry = registry_with(3, RecordingTransitions::instant());

    let id = registry
        .show(NotificationConfig::new("hi").with_duration_ms(1000).show_progress(true))
        .await;
    settle().await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    let progress = registry.timeout_progress(&id).await.unwrap();
    assert!((0.45..=0.55).contains(&progress), "got {progress}");
}
