// SPDX-License-Identifier: MPL-2.0
//! Timer dispatch for a shared queue.
//!
//! The core [`NotificationQueue`] is synchronous and expects someone to
//! call [`tick`](NotificationQueue::tick) when a deadline passes.
//! `SharedQueue` is that someone: it owns the queue behind a mutex and
//! spawns one tokio task that sleeps until the earliest running deadline
//! and ticks. Every mutating call re-arms the sleeper, so shortening or
//! extending a deadline takes effect immediately.
//!
//! All mutation is serialized through the single mutex-owned queue;
//! expiry is dispatched as a wakeup to the driver task, which takes the
//! same lock. That keeps the queue's invariants intact even though timer
//! callbacks run on a runtime thread.

use crate::error::Result;
use crate::notification::{Notification, NotificationKey};
use crate::queue::NotificationQueue;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// A `NotificationQueue` with a background expiry task.
///
/// Construct with [`spawn`](Self::spawn) inside a tokio runtime. Dropping
/// the handle (or calling [`close`](Self::close)) stops the task, so a
/// host can dispose the queue on shutdown without stray timer firings.
pub struct SharedQueue {
    inner: Arc<Mutex<NotificationQueue>>,
    rearm: Arc<Notify>,
    expiry_task: JoinHandle<()>,
}

impl SharedQueue {
    /// Wraps a queue and spawns its expiry task on the current runtime.
    #[must_use]
    pub fn spawn(queue: NotificationQueue) -> Self {
        let inner = Arc::new(Mutex::new(queue));
        let rearm = Arc::new(Notify::new());
        let expiry_task = tokio::spawn(run_expiry(Arc::clone(&inner), Arc::clone(&rearm)));
        Self {
            inner,
            rearm,
            expiry_task,
        }
    }

    /// Adds a notification. See [`NotificationQueue::add`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyTitle`] for a blank title.
    pub fn add(&self, notification: Notification) -> Result<NotificationKey> {
        let key = self.lock().add(notification)?;
        self.rearm.notify_one();
        Ok(key)
    }

    /// Dismisses a notification. See [`NotificationQueue::dismiss`].
    pub fn dismiss(&self, key: NotificationKey) {
        self.lock().dismiss(key);
        self.rearm.notify_one();
    }

    /// Pauses a notification's countdown. See [`NotificationQueue::pause`].
    pub fn pause(&self, key: NotificationKey) {
        self.lock().pause(key);
        self.rearm.notify_one();
    }

    /// Resumes a paused countdown. See [`NotificationQueue::resume`].
    pub fn resume(&self, key: NotificationKey) {
        self.lock().resume(key);
        self.rearm.notify_one();
    }

    /// Activates a structured action. See [`NotificationQueue::activate`].
    pub fn activate(&self, key: NotificationKey) {
        self.lock().activate(key);
        self.rearm.notify_one();
    }

    /// Removes all notifications. See [`NotificationQueue::clear`].
    pub fn clear(&self) {
        self.lock().clear();
        self.rearm.notify_one();
    }

    /// Returns the snapshot receiver. See [`NotificationQueue::subscribe`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.lock().subscribe()
    }

    /// Returns the current active notifications in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().snapshot()
    }

    /// Stops the expiry task. Pending deadlines will no longer fire;
    /// the queue contents are left as they are.
    pub fn close(&self) {
        self.expiry_task.abort();
    }

    fn lock(&self) -> MutexGuard<'_, NotificationQueue> {
        // Queue operations are transactional, so state behind a poisoned
        // lock is still consistent and safe to keep serving.
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SharedQueue {
    fn drop(&mut self) {
        self.expiry_task.abort();
    }
}

async fn run_expiry(queue: Arc<Mutex<NotificationQueue>>, rearm: Arc<Notify>) {
    loop {
        let deadline = queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_deadline();

        match deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = rearm.notified() => {
                        // Deadlines changed; recompute the sleep.
                    }
                    _ = tokio::time::sleep_until(deadline) => {
                        queue
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .tick();
                    }
                }
            }
            None => rearm.notified().await,
        }
    }
}
