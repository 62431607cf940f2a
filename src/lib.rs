// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` is a timer-driven queue of transient user-facing
//! notifications (toasts).
//!
//! It owns key assignment, insertion order, per-notification expiry with
//! pause-on-interaction, keyed idempotent dismissal, and a batched
//! snapshot protocol toward whatever renders the toasts. Rendering
//! itself is out of scope: a render surface subscribes to the queue and
//! draws the latest snapshot.
//!
//! ```
//! use toast_queue::{Notification, NotificationQueue};
//!
//! let mut queue = NotificationQueue::new();
//! let mut surface = queue.subscribe();
//!
//! let key = queue.add(Notification::success("Image saved")).unwrap();
//! assert_eq!(surface.borrow_and_update().len(), 1);
//!
//! queue.dismiss(key);
//! assert!(surface.borrow_and_update().is_empty());
//! ```
//!
//! For hosts that want expiry handled in the background, wrap the queue
//! in a [`SharedQueue`], which sleeps until the next deadline on a tokio
//! task and ticks the queue for you.

#![doc(html_root_url = "https://docs.rs/toast_queue/0.1.0")]

pub mod commit;
pub mod config;
pub mod driver;
pub mod error;
pub mod notification;
pub mod queue;

pub use commit::{CommitStrategy, CoordinatedCommit, SyncCommit};
pub use config::QueueConfig;
pub use driver::SharedQueue;
pub use error::{Error, Result};
pub use notification::{Action, CloseHandle, Expiry, Notification, NotificationKey, Variant};
pub use queue::NotificationQueue;
