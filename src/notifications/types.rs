//! Core notification data types
//!
//! Identity, configuration, and the registry-owned `Notification` record.
//! Everything here is plain data; lifecycle behaviour lives in
//! [`registry`](crate::notifications::registry).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notifications::error::ParseError;

/// Unique identifier for a notification.
///
/// Generated ids are UUIDv4 strings; callers may also supply their own via
/// [`NotificationConfig::with_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(String);

impl NotificationId {
    /// Generate a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic category of a notification. Determines styling defaults and,
/// for [`Category::Error`], a longer default auto-dismiss duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    Neutral,
}

impl Category {
    /// Default icon name for the category, if it has one.
    pub fn default_icon(&self) -> Option<&'static str> {
        match self {
            Category::Info => Some("info-circle"),
            Category::Success => Some("check-circle"),
            Category::Warning => Some("alert-triangle"),
            Category::Error => Some("x-circle"),
            Category::Neutral => None,
        }
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Category::Info),
            "success" => Ok(Category::Success),
            "warning" => Ok(Category::Warning),
            "error" => Ok(Category::Error),
            "neutral" => Ok(Category::Neutral),
            _ => Err(ParseError::Category(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Info => "info",
            Category::Success => "success",
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// Screen edge a notification is anchored to. Determines the slide
/// direction and the swipe-dismiss axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Position::Top),
            "bottom" => Ok(Position::Bottom),
            "left" => Ok(Position::Left),
            "right" => Ok(Position::Right),
            _ => Err(ParseError::Position(s.to_string())),
        }
    }
}

/// Kind of entrance/exit animation a transition executor should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    Slide,
    Fade,
    Scale,
}

impl FromStr for AnimationKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slide" => Ok(AnimationKind::Slide),
            "fade" => Ok(AnimationKind::Fade),
            "scale" => Ok(AnimationKind::Scale),
            _ => Err(ParseError::Animation(s.to_string())),
        }
    }
}

/// Direction of travel for slide animations, derived from the anchored edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideDirection {
    FromTop,
    FromBottom,
    FromLeft,
    FromRight,
}

impl From<Position> for SlideDirection {
    fn from(position: Position) -> Self {
        match position {
            Position::Top => SlideDirection::FromTop,
            Position::Bottom => SlideDirection::FromBottom,
            Position::Left => SlideDirection::FromLeft,
            Position::Right => SlideDirection::FromRight,
        }
    }
}

/// Visual variant. Purely presentational; the engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Filled,
    Soft,
    Outline,
}

/// Lifecycle state of a notification.
///
/// Transitions are driven exclusively by the registry:
/// `Entering → Visible → Exiting → Removed`, with `Entering → Exiting`
/// allowed when hide is requested before the entrance resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Entering,
    Visible,
    Exiting,
    Removed,
}

impl LifecycleState {
    /// Whether the notification can still be interacted with (hidden,
    /// updated, swiped). `Exiting`/`Removed` entries ignore further triggers.
    pub fn is_live(&self) -> bool {
        matches!(self, LifecycleState::Entering | LifecycleState::Visible)
    }
}

/// Hook invoked with a snapshot of the notification at a lifecycle point.
pub type LifecycleHook = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Handler invoked when the notification's action button is pressed.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// A single action button attached to a notification.
///
/// Pressing the action runs the handler; it does not dismiss the
/// notification by itself.
#[derive(Clone)]
pub struct NotificationAction {
    pub label: String,
    pub handler: ActionHandler,
    pub disabled: bool,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

// Closures have no useful Debug output, so the Debug impls here list the
// data fields and elide the handlers/hooks.
impl fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// User-supplied configuration for one notification. Immutable once accepted
/// by the registry, except through [`NotificationPatch`].
#[derive(Clone)]
pub struct NotificationConfig {
    /// Caller-supplied id. Generated when absent.
    pub id: Option<NotificationId>,
    pub message: String,
    pub category: Category,
    pub variant: Variant,
    pub position: Position,
    pub animation: AnimationKind,
    /// Auto-dismiss duration in milliseconds. `None` resolves to the engine
    /// default for the category; values below zero clamp to 0; 0 disables
    /// auto-dismiss.
    pub duration_ms: Option<i64>,
    pub auto_dismiss: bool,
    pub dismissible: bool,
    pub swipe_to_dismiss: bool,
    /// Drive a presentational 0→1 progress value over the timeout duration.
    pub show_progress: bool,
    pub icon: Option<String>,
    pub action: Option<NotificationAction>,
    /// Fires when the entrance transition resolves.
    pub on_show: Option<LifecycleHook>,
    /// Fires after the exit transition resolves and the entry is removed.
    pub on_hide: Option<LifecycleHook>,
    /// Fires alongside `on_hide`, as the user-facing dismissal hook.
    pub on_dismiss: Option<LifecycleHook>,
    /// Replaces the default body-tap behaviour (hide when dismissible).
    pub on_press: Option<LifecycleHook>,
}

impl NotificationConfig {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: None,
            message: message.into(),
            category: Category::default(),
            variant: Variant::default(),
            position: Position::default(),
            animation: AnimationKind::default(),
            duration_ms: None,
            auto_dismiss: true,
            dismissible: true,
            swipe_to_dismiss: true,
            show_progress: false,
            icon: None,
            action: None,
            on_show: None,
            on_hide: None,
            on_dismiss: None,
            on_press: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_animation(mut self, animation: AnimationKind) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn auto_dismiss(mut self, auto_dismiss: bool) -> Self {
        self.auto_dismiss = auto_dismiss;
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn swipe_to_dismiss(mut self, swipe_to_dismiss: bool) -> Self {
        self.swipe_to_dismiss = swipe_to_dismiss;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn on_show(mut self, hook: impl Fn(&Notification) + Send + Sync + 'static) -> Self {
        self.on_show = Some(Arc::new(hook));
        self
    }

    pub fn on_hide(mut self, hook: impl Fn(&Notification) + Send + Sync + 'static) -> Self {
        self.on_hide = Some(Arc::new(hook));
        self
    }

    pub fn on_dismiss(mut self, hook: impl Fn(&Notification) + Send + Sync + 'static) -> Self {
        self.on_dismiss = Some(Arc::new(hook));
        self
    }

    pub fn on_press(mut self, hook: impl Fn(&Notification) + Send + Sync + 'static) -> Self {
        self.on_press = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("category", &self.category)
            .field("variant", &self.variant)
            .field("position", &self.position)
            .field("animation", &self.animation)
            .field("duration_ms", &self.duration_ms)
            .field("auto_dismiss", &self.auto_dismiss)
            .field("dismissible", &self.dismissible)
            .field("swipe_to_dismiss", &self.swipe_to_dismiss)
            .field("show_progress", &self.show_progress)
            .field("icon", &self.icon)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

/// Partial configuration merged into an existing notification by
/// [`NotificationRegistry::update`](crate::notifications::registry::NotificationRegistry::update).
///
/// Only fields that are `Some` are applied. A changed duration restarts the
/// auto-dismiss timer; nothing else touches lifecycle state.
#[derive(Clone, Default)]
pub struct NotificationPatch {
    pub message: Option<String>,
    pub category: Option<Category>,
    pub variant: Option<Variant>,
    pub icon: Option<String>,
    pub duration_ms: Option<i64>,
    pub action: Option<NotificationAction>,
    pub show_progress: Option<bool>,
}

impl NotificationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = Some(show_progress);
        self
    }
}

impl fmt::Debug for NotificationPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationPatch")
            .field("message", &self.message)
            .field("category", &self.category)
            .field("variant", &self.variant)
            .field("icon", &self.icon)
            .field("duration_ms", &self.duration_ms)
            .field("show_progress", &self.show_progress)
            .finish_non_exhaustive()
    }
}

/// One notification as owned by the registry.
///
/// Callers only ever see clones (snapshots); the registry is the sole
/// mutator of `visible`, `state`, and the swipe progress.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    config: NotificationConfig,
    visible: bool,
    state: LifecycleState,
    /// Resolved auto-dismiss duration. Zero means no auto-dismiss.
    duration: Duration,
    swipe_progress: f64,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, config: NotificationConfig, duration: Duration) -> Self {
        Self {
            id,
            config,
            visible: true,
            state: LifecycleState::Entering,
            duration,
            swipe_progress: 0.0,
        }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    pub fn message(&self) -> &str {
        &self.config.message
    }

    pub fn category(&self) -> Category {
        self.config.category
    }

    pub fn position(&self) -> Position {
        self.config.position
    }

    pub fn animation(&self) -> AnimationKind {
        self.config.animation
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Resolved auto-dismiss duration; zero when auto-dismiss is disabled.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Latest sampled swipe-dismiss progress in `[0, 1]`.
    pub fn swipe_progress(&self) -> f64 {
        self.swipe_progress
    }

    /// Whether an auto-dismiss timer should be armed on reaching `Visible`.
    pub fn auto_dismisses(&self) -> bool {
        self.config.auto_dismiss && !self.duration.is_zero()
    }

    pub(crate) fn set_state(&mut self, state: LifecycleState) {
        self.state = state;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_swipe_progress(&mut self, progress: f64) {
        self.swipe_progress = progress;
    }

    pub(crate) fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Merge a patch into the configuration. The resolved duration is
    /// handled by the registry so the timer decision stays in one place.
    pub(crate) fn apply_patch(&mut self, patch: NotificationPatch) {
        if let Some(message) = patch.message {
            self.config.message = message;
        }
        if let Some(category) = patch.category {
            self.config.category = category;
        }
        if let Some(variant) = patch.variant {
            self.config.variant = variant;
        }
        if let Some(icon) = patch.icon {
            self.config.icon = Some(icon);
        }
        if let Some(duration_ms) = patch.duration_ms {
            self.config.duration_ms = Some(duration_ms);
        }
        if let Some(action) = patch.action {
            self.config.action = Some(action);
        }
        if let Some(show_progress) = patch.show_progress {
            self.config.show_progress = show_progress;
        }
    }
}
