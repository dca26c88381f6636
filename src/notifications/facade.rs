//! Typed convenience helpers
//!
//! Thin wrappers over the registry's public contract: category-typed
//! constructors, the sticky `loading` notification, and the promise wrapper
//! that ties a loading notification to the outcome of a future. Nothing
//! here touches registry internals.

use std::future::Future;

use crate::notifications::registry::NotificationRegistry;
use crate::notifications::types::{Category, NotificationConfig, NotificationId};

/// Message for one branch of [`PromiseOutcome`]: either fixed text or a
/// function of the resolved value/error.
pub enum PromiseMessage<V> {
    Static(String),
    FromValue(Box<dyn FnOnce(&V) -> String + Send>),
}

impl<V> PromiseMessage<V> {
    pub fn text(message: impl Into<String>) -> Self {
        PromiseMessage::Static(message.into())
    }

    pub fn from_value(f: impl FnOnce(&V) -> String + Send + 'static) -> Self {
        PromiseMessage::FromValue(Box::new(f))
    }

    fn resolve(self, value: &V) -> String {
        match self {
            PromiseMessage::Static(message) => message,
            PromiseMessage::FromValue(f) => f(value),
        }
    }
}

impl<V> From<&str> for PromiseMessage<V> {
    fn from(message: &str) -> Self {
        PromiseMessage::text(message)
    }
}

impl<V> From<String> for PromiseMessage<V> {
    fn from(message: String) -> Self {
        PromiseMessage::Static(message)
    }
}

/// The three user-visible phases of a wrapped async operation.
pub struct PromiseOutcome<T, E> {
    pub loading: String,
    pub success: PromiseMessage<T>,
    pub error: PromiseMessage<E>,
}

impl<T, E> PromiseOutcome<T, E> {
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<PromiseMessage<T>>,
        error: impl Into<PromiseMessage<E>>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

impl NotificationRegistry {
    /// Success notification with the category's default icon.
    pub async fn success(&self, message: impl Into<String>) -> NotificationId {
        self.show(typed(message, Category::Success)).await
    }

    /// Error notification; defaults to the longer error duration.
    pub async fn error(&self, message: impl Into<String>) -> NotificationId {
        self.show(typed(message, Category::Error)).await
    }

    /// Warning notification with the category's default icon.
    pub async fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.show(typed(message, Category::Warning)).await
    }

    /// Info notification with the category's default icon.
    pub async fn info(&self, message: impl Into<String>) -> NotificationId {
        self.show(typed(message, Category::Info)).await
    }

    /// Unstyled notification with the standard defaults.
    pub async fn neutral(&self, message: impl Into<String>) -> NotificationId {
        self.show(typed(message, Category::Neutral)).await
    }

    /// Sticky progress notification: never auto-dismisses and cannot be
    /// dismissed by the user. Must be hidden explicitly.
    pub async fn loading(&self, message: impl Into<String>) -> NotificationId {
        let config = NotificationConfig::new(message)
            .with_category(Category::Neutral)
            .with_icon("spinner")
            .auto_dismiss(false)
            .dismissible(false)
            .swipe_to_dismiss(false);
        self.show(config).await
    }

    /// Tie a loading notification to a future.
    ///
    /// Shows `outcome.loading`, awaits the future, hides the loading
    /// notification on both branches, then shows the success or error
    /// notification. The original result is returned unaltered, so caller
    /// error handling is never swallowed.
    ///
    /// ```no_run
    /// # use toastline::{EngineConfig, NotificationRegistry, PromiseMessage, PromiseOutcome};
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let registry = NotificationRegistry::new(EngineConfig::default());
    /// let result: Result<u64, String> = registry
    ///     .promise(
    ///         async { Ok(42) },
    ///         PromiseOutcome::new(
    ///             "uploading...",
    ///             PromiseMessage::from_value(|bytes: &u64| format!("uploaded {bytes} bytes")),
    ///             "upload failed",
    ///         ),
    ///     )
    ///     .await;
    /// # let _ = result;
    /// # }
    /// ```
    pub async fn promise<T, E, Fut>(
        &self,
        fut: Fut,
        outcome: PromiseOutcome<T, E>,
    ) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let loading_id = self.loading(outcome.loading).await;
        let result = fut.await;
        // The loading notification must never be left dangling, so hide it
        // before reporting either branch.
        self.hide(&loading_id).await;
        match result {
            Ok(value) => {
                let message = outcome.success.resolve(&value);
                self.success(message).await;
                Ok(value)
            }
            Err(error) => {
                let message = outcome.error.resolve(&error);
                self.error(message).await;
                Err(error)
            }
        }
    }
}

fn typed(message: impl Into<String>, category: Category) -> NotificationConfig {
    let mut config = NotificationConfig::new(message).with_category(category);
    if let Some(icon) = category.default_icon() {
        config = config.with_icon(icon);
    }
    config
}
