// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `NotificationQueue` owns the ordered set of active notifications,
//! their expiry timers, and the batched-commit protocol toward the render
//! surface. It is a plain owned object: construct one per application (or
//! per test), share it however the host prefers. All operations are
//! synchronous; expiry is processed by [`tick`](NotificationQueue::tick),
//! which a host drives itself or through [`SharedQueue`](crate::driver::SharedQueue).

use crate::commit::{CommitStrategy, SyncCommit};
use crate::config::{QueueConfig, DEFAULT_EXPIRE_MS};
use crate::error::{Error, Result};
use crate::notification::{Action, CloseHandle, Expiry, Notification, NotificationKey};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Expiry countdown state of one notification.
///
/// Dismissal and expiry are keyed, never index-based: the deadline lives
/// on the entry itself, so removing an earlier notification can never
/// shift a timer onto a different one.
#[derive(Debug, Clone, Copy)]
enum TimerState {
    /// Counting down toward `deadline`.
    Running { deadline: Instant },
    /// Countdown suspended with `remaining` left on the clock.
    Paused { remaining: Duration },
    /// No automatic expiry.
    Disabled,
}

#[derive(Debug, Clone)]
struct Entry {
    notification: Notification,
    timer: TimerState,
}

/// Ordered queue of active notifications with per-entry expiry timers.
pub struct NotificationQueue {
    /// Active notifications, oldest first. Insertion order is preserved
    /// across removals.
    entries: VecDeque<Entry>,
    /// Expiry applied when a notification does not request one.
    default_expiry: Duration,
    /// Whether `pause` calls are honored.
    pause_on_hover: bool,
    strategy: Box<dyn CommitStrategy>,
    snapshot_tx: watch::Sender<Vec<Notification>>,
}

impl NotificationQueue {
    /// Creates an empty queue with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&QueueConfig::default())
    }

    /// Creates an empty queue from a configuration.
    #[must_use]
    pub fn with_config(config: &QueueConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            entries: VecDeque::new(),
            default_expiry: Duration::from_millis(
                config.default_expire_ms.unwrap_or(DEFAULT_EXPIRE_MS),
            ),
            pause_on_hover: config.pause_on_hover.unwrap_or(true),
            strategy: Box::new(SyncCommit),
            snapshot_tx,
        }
    }

    /// Replaces the commit strategy. Affects how subsequent snapshots
    /// are flushed, not what they contain.
    pub fn set_commit_strategy(&mut self, strategy: Box<dyn CommitStrategy>) {
        self.strategy = strategy;
    }

    /// Returns a receiver that always holds the latest committed
    /// snapshot of active notifications, in insertion order.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.snapshot_tx.subscribe()
    }

    /// Adds a notification, assigns it a fresh key, and returns the key.
    ///
    /// The notification is appended after all currently-active entries.
    /// Unless it requests `Expiry::Never`, its timer starts immediately;
    /// with no explicit expiry the configured default (5000 ms out of the
    /// box) applies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTitle`] when the title is empty or
    /// whitespace-only. Nothing is enqueued in that case.
    pub fn add(&mut self, mut notification: Notification) -> Result<NotificationKey> {
        if notification.title().trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        // The queue owns key assignment: re-keying on add keeps keys
        // unique among active entries even when the same notification
        // value is added twice.
        let key = notification.assign_fresh_key();
        let timer = match notification.expiry() {
            Some(Expiry::Never) => TimerState::Disabled,
            Some(Expiry::After(duration)) => TimerState::Running {
                deadline: Instant::now() + duration,
            },
            None => TimerState::Running {
                deadline: Instant::now() + self.default_expiry,
            },
        };

        self.entries.push_back(Entry {
            notification,
            timer,
        });
        self.commit();
        Ok(key)
    }

    /// Removes a notification and cancels its timer.
    ///
    /// Total and idempotent: unknown or already-dismissed keys are a
    /// no-op (UI events race against expiry, so stale keys are normal),
    /// and a no-op publishes no snapshot.
    pub fn dismiss(&mut self, key: NotificationKey) {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.notification.key() == key)
        {
            self.entries.remove(pos);
            self.commit();
        }
    }

    /// Suspends a notification's expiry countdown, recording the time
    /// left so [`resume`](Self::resume) continues where it stopped.
    ///
    /// No-op for unknown keys, non-running timers, never-expiring
    /// notifications, and when pause-on-hover is disabled by config.
    pub fn pause(&mut self, key: NotificationKey) {
        if !self.pause_on_hover {
            return;
        }
        let now = Instant::now();
        if let Some(entry) = self.entry_mut(key) {
            if let TimerState::Running { deadline } = entry.timer {
                entry.timer = TimerState::Paused {
                    remaining: deadline.saturating_duration_since(now),
                };
            }
        }
    }

    /// Restarts a paused countdown with its remaining time, not the full
    /// original duration. No-op for unknown keys and non-paused timers.
    pub fn resume(&mut self, key: NotificationKey) {
        let now = Instant::now();
        if let Some(entry) = self.entry_mut(key) {
            if let TimerState::Paused { remaining } = entry.timer {
                entry.timer = TimerState::Running {
                    deadline: now + remaining,
                };
            }
        }
    }

    /// Activates a notification's structured action.
    ///
    /// Runs the handler with a [`CloseHandle`] bound to this key, then
    /// dismisses the notification if the action closes on activation or
    /// the handler requested it, all within one commit. No-op for
    /// unknown keys and for `Action::Custom` payloads, which the render
    /// surface interprets on its own.
    pub fn activate(&mut self, key: NotificationKey) {
        let action = self
            .entries
            .iter()
            .find(|e| e.notification.key() == key)
            .and_then(|e| e.notification.action().cloned());

        let Some(Action::Button {
            on_activate,
            close_on_activate,
            ..
        }) = action
        else {
            return;
        };

        let handle = CloseHandle::new();
        on_activate(handle.clone());
        if close_on_activate || handle.close_requested() {
            self.dismiss(key);
        }
    }

    /// Removes every notification whose running deadline has passed.
    ///
    /// All expiries observed by one tick land in a single batched
    /// commit. Paused and never-expiring entries are untouched.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|e| !matches!(e.timer, TimerState::Running { deadline } if deadline <= now));
        if self.entries.len() != before {
            self.commit();
        }
    }

    /// Returns the earliest running deadline, so a driver can sleep
    /// exactly until the next expiry. `None` when nothing is counting
    /// down.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .iter()
            .filter_map(|e| match e.timer {
                TimerState::Running { deadline } => Some(deadline),
                TimerState::Paused { .. } | TimerState::Disabled => None,
            })
            .min()
    }

    /// Removes all notifications in one commit.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.commit();
        }
    }

    /// Returns the current active notifications in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.iter().map(|e| e.notification.clone()).collect()
    }

    /// Returns the number of active notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether `key` refers to an active notification.
    #[must_use]
    pub fn contains(&self, key: NotificationKey) -> bool {
        self.entries.iter().any(|e| e.notification.key() == key)
    }

    fn entry_mut(&mut self, key: NotificationKey) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.notification.key() == key)
    }

    /// Publishes the current state as one snapshot through the commit
    /// strategy. Called exactly once per mutating public operation.
    fn commit(&self) {
        let mut snapshot = Some(self.snapshot());
        let tx = &self.snapshot_tx;
        self.strategy.commit(&mut || {
            if let Some(state) = snapshot.take() {
                // send_replace keeps the latest value even with no
                // receivers attached yet.
                tx.send_replace(state);
            }
        });
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationQueue")
            .field("entries", &self.entries)
            .field("default_expiry", &self.default_expiry)
            .field("pause_on_hover", &self.pause_on_hover)
            .finish_non_exhaustive()
    }
}
