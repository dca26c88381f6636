//! Transient-Notification Lifecycle Engine
//!
//! Owns the full lifecycle of ephemeral notifications: creation, entrance,
//! auto-dismiss, gesture dismissal, exit, and removal.
//!
//! # Architecture
//!
//! - **Registry**: the owning, insertion-ordered collection and the only
//!   mutator of notification state ([`registry`])
//! - **State machine**: each notification moves
//!   `Entering → Visible → Exiting → Removed`, driven by discrete events
//! - **TransitionExecutor**: pluggable awaitable enter/exit animations
//!   ([`transition`])
//! - **TimerService**: single-fire cancellable auto-dismiss timers ([`timer`])
//! - **Swipe interpreter**: pure drag-delta → dismiss-progress mapping
//!   ([`swipe`])
//! - **Facade**: typed helpers and the promise wrapper ([`facade`])
//!
//! # Example Usage
//!
//! ```no_run
//! use toastline::{EngineConfig, NotificationConfig, NotificationRegistry};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = NotificationRegistry::new(EngineConfig::default());
//!
//! // Full control through the core contract...
//! let id = registry
//!     .show(NotificationConfig::new("upload complete").with_duration_ms(2500))
//!     .await;
//!
//! // ...or through the typed facade.
//! registry.error("upload failed").await;
//! registry.hide(&id).await;
//! # }
//! ```

pub mod error;
pub mod facade;
pub mod registry;
pub mod swipe;
pub mod timer;
pub mod transition;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export core types for convenience
pub use registry::NotificationRegistry;
pub use transition::{ImmediateTransitions, TransitionExecutor};
pub use types::{Notification, NotificationConfig, NotificationId};
