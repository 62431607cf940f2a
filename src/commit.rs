// SPDX-License-Identifier: MPL-2.0
//! Commit strategies for publishing queue snapshots.
//!
//! Every public queue operation ends in at most one commit: the queue
//! hands the strategy a flush closure and the strategy decides how to
//! run it. The default runs it immediately; hosts with a synchronized
//! repaint primitive (view transitions and the like) can wrap the flush
//! so entry/exit animations land in the same frame as the state change.
//! The committed state is identical either way.

use std::sync::Arc;

/// Decides how a snapshot flush reaches the render surface.
pub trait CommitStrategy: Send + Sync {
    /// Runs the flush. Implementations must call `flush` exactly once,
    /// synchronously; the queue's state is already updated when this is
    /// invoked.
    fn commit(&self, flush: &mut dyn FnMut());
}

/// Plain synchronous flush. The default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncCommit;

impl CommitStrategy for SyncCommit {
    fn commit(&self, flush: &mut dyn FnMut()) {
        flush();
    }
}

/// Wraps the flush in a host-supplied repaint coordinator.
///
/// The coordinator receives the flush closure and must invoke it once,
/// typically inside whatever "view transition" primitive the platform
/// offers. Functional behavior does not depend on what the coordinator
/// does around the flush.
#[derive(Clone)]
pub struct CoordinatedCommit {
    coordinator: Arc<dyn Fn(&mut dyn FnMut()) + Send + Sync>,
}

impl CoordinatedCommit {
    /// Creates a strategy from a repaint coordinator.
    pub fn new(coordinator: impl Fn(&mut dyn FnMut()) + Send + Sync + 'static) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
        }
    }
}

impl CommitStrategy for CoordinatedCommit {
    fn commit(&self, flush: &mut dyn FnMut()) {
        (self.coordinator)(flush);
    }
}
