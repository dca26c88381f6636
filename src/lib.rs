//! toastline: async lifecycle engine for transient in-app notifications.
//!
//! The crate owns everything between "show a toast" and "the toast is gone":
//! queueing with capacity-based eviction, a per-notification state machine
//! (`Entering → Visible → Exiting → Removed`), cancellable auto-dismiss
//! timers, swipe-to-dismiss interpretation, and typed convenience helpers
//! including a promise wrapper for async operations.
//!
//! Rendering, animation curves, and gesture recognition stay outside: the
//! engine drives a pluggable [`TransitionExecutor`](notifications::transition::TransitionExecutor)
//! and consumes normalized drag deltas.
//!
//! # Example
//!
//! ```no_run
//! use toastline::{EngineConfig, NotificationRegistry};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = NotificationRegistry::new(EngineConfig::default());
//!
//! let id = registry.info("settings saved").await;
//! // ... later, or let the auto-dismiss timer handle it:
//! registry.hide(&id).await;
//! # }
//! ```

pub mod config;
pub mod notifications;

pub use config::EngineConfig;
pub use notifications::facade::{PromiseMessage, PromiseOutcome};
pub use notifications::registry::NotificationRegistry;
pub use notifications::transition::{ImmediateTransitions, TransitionExecutor};
pub use notifications::types::{
    AnimationKind, Category, LifecycleState, Notification, NotificationAction,
    NotificationConfig, NotificationId, NotificationPatch, Position, SlideDirection, Variant,
};
