// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, its `Variant` and
//! `Expiry` tags, and the `Action` descriptor a render surface can
//! attach interactive behavior to.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Unique identifier for a notification.
///
/// Keys are drawn from a process-wide monotonic counter, so a key is
/// never reused even after its notification has been dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationKey(u64);

impl NotificationKey {
    /// Creates a new unique notification key.
    pub fn new() -> Self {
        use std::sync::atomic::AtomicU64;
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Visual tone of a notification. Purely advisory for the render
/// surface; the queue does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Neutral message with no particular tone.
    #[default]
    Default,
    /// Operation completed successfully.
    Success,
    /// Something went wrong.
    Error,
}

/// How long a notification stays up before the queue removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Remove automatically after the given duration in the running state.
    After(Duration),
    /// Keep until explicitly dismissed.
    Never,
}

/// Expiry applied when the caller does not request one.
pub const DEFAULT_EXPIRY: Duration = Duration::from_millis(5000);

/// Close callback handed to a structured action's handler.
///
/// Calling [`close`](Self::close) requests dismissal of exactly the
/// notification the action belongs to; the queue applies the request
/// after the handler returns, inside the same commit. The request is
/// read once, at that point: closing through a handle kept beyond the
/// handler has no effect, and late dismissal goes through the queue's
/// `dismiss` with the notification's key.
#[derive(Debug, Clone, Default)]
pub struct CloseHandle {
    requested: Arc<AtomicBool>,
}

impl CloseHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Requests dismissal of the owning notification.
    pub fn close(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub(crate) fn close_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Handler invoked when a structured action is activated.
pub type ActivateFn = Arc<dyn Fn(CloseHandle) + Send + Sync>;

/// Interactive behavior attached to a notification.
///
/// Exactly one of the two shapes is active per notification. `Custom`
/// payloads are entirely the render surface's business; the queue never
/// inspects them and they do not participate in close-on-activate.
#[derive(Clone)]
pub enum Action {
    /// Structured descriptor the queue knows how to activate.
    Button {
        /// Label for the action button.
        text: String,
        /// Handler run on activation; receives a close callback bound to
        /// this notification's key.
        on_activate: ActivateFn,
        /// Dismiss the notification automatically after the handler runs.
        close_on_activate: bool,
    },
    /// Opaque payload interpreted by the render surface itself.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Action {
    /// Creates a structured action that dismisses its notification after
    /// activation (the default behavior).
    pub fn button(
        text: impl Into<String>,
        on_activate: impl Fn(CloseHandle) + Send + Sync + 'static,
    ) -> Self {
        Action::Button {
            text: text.into(),
            on_activate: Arc::new(on_activate),
            close_on_activate: true,
        }
    }

    /// Creates a structured action that leaves its notification up after
    /// activation. The handler may still dismiss it through the
    /// [`CloseHandle`], or the caller through `dismiss`.
    pub fn button_keep_open(
        text: impl Into<String>,
        on_activate: impl Fn(CloseHandle) + Send + Sync + 'static,
    ) -> Self {
        Action::Button {
            text: text.into(),
            on_activate: Arc::new(on_activate),
            close_on_activate: false,
        }
    }

    /// Wraps an opaque payload for the render surface.
    pub fn custom(payload: impl Any + Send + Sync) -> Self {
        Action::Custom(Arc::new(payload))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Button {
                text,
                close_on_activate,
                ..
            } => f
                .debug_struct("Button")
                .field("text", text)
                .field("close_on_activate", close_on_activate)
                .finish_non_exhaustive(),
            Action::Custom(_) => f.debug_tuple("Custom").finish(),
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique key for this notification.
    key: NotificationKey,
    /// Short headline. Must be non-empty; the queue rejects blank titles.
    title: String,
    /// Optional longer body text.
    message: Option<String>,
    /// Visual tone.
    variant: Variant,
    /// Optional interactive behavior.
    action: Option<Action>,
    /// Requested expiry; `None` means "use the queue default".
    expiry: Option<Expiry>,
}

impl Notification {
    /// Creates a notification with the default (neutral) variant.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            key: NotificationKey::new(),
            title: title.into(),
            message: None,
            variant: Variant::Default,
            action: None,
            expiry: None,
        }
    }

    /// Creates a success notification.
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title).with_variant(Variant::Success)
    }

    /// Creates an error notification.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title).with_variant(Variant::Error)
    }

    /// Sets the variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Adds a body message below the title.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches an action.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Requests removal after `duration` of running (unpaused) time,
    /// overriding the queue default.
    #[must_use]
    pub fn expire_after(mut self, duration: Duration) -> Self {
        self.expiry = Some(Expiry::After(duration));
        self
    }

    /// Keeps the notification up until it is explicitly dismissed.
    #[must_use]
    pub fn never_expires(mut self) -> Self {
        self.expiry = Some(Expiry::Never);
        self
    }

    /// Returns the notification's unique key.
    ///
    /// The queue assigns a fresh key when the notification is added, so
    /// the key returned by `add` is the one to target operations with.
    #[must_use]
    pub fn key(&self) -> NotificationKey {
        self.key
    }

    /// Replaces the key with a freshly generated one and returns it.
    ///
    /// Called by the queue on add: a notification cloned from a template
    /// can then never carry a duplicate key into the active set.
    pub(crate) fn assign_fresh_key(&mut self) -> NotificationKey {
        self.key = NotificationKey::new();
        self.key
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the attached action, if any.
    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Returns the requested expiry; `None` means the queue default applies.
    #[must_use]
    pub fn expiry(&self) -> Option<Expiry> {
        self.expiry
    }
}
