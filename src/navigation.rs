//! Navigation-driven reset: every completed navigation clears the status prompt.
//!
//! The router holds a [`NavigationReset`] and calls
//! [`NavigationReset::navigation_completed`] from its "route changed" hook; the
//! slot is empty by the time that call returns. Routers that live on another
//! thread and can only post messages use [`navigation_queue`] instead and
//! forward the queued events into the reset on their loop.

use std::sync::{Arc, Weak};

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::arbiter::PromptArbiter;

/// Handler registered against one arbiter. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NavigationReset {
    arbiter: Weak<PromptArbiter>,
}

impl NavigationReset {
    #[must_use]
    pub fn new(arbiter: &Arc<PromptArbiter>) -> Self {
        Self {
            arbiter: Arc::downgrade(arbiter),
        }
    }

    /// Clear the status prompt now. An `Empty` request is never suppressed,
    /// so the slot is empty on `Ok`. Returns `Ok(false)` once the arbiter
    /// this reset was registered with is gone.
    pub fn navigation_completed(&self) -> Result<bool> {
        let Some(arbiter) = self.arbiter.upgrade() else {
            return Ok(false);
        };
        if arbiter.reset_for_navigation()? {
            tracing::debug!("status prompt cleared by navigation");
        }
        Ok(true)
    }
}

/// Marker posted by a router that reports navigations through a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCompleted;

/// Sending half of the queued adapter.
#[derive(Debug, Clone)]
pub struct NavigationQueue {
    tx: Sender<NavigationCompleted>,
}

impl NavigationQueue {
    /// Post a navigation. Returns `false` when the receiving side is gone.
    pub fn navigation_completed(&self) -> bool {
        self.tx.send(NavigationCompleted).is_ok()
    }
}

/// Receiving half of the queued adapter.
#[derive(Debug)]
pub struct NavigationEvents {
    rx: Receiver<NavigationCompleted>,
}

impl NavigationEvents {
    /// Apply every queued navigation without blocking; returns how many ran.
    pub fn drain_into(&self, reset: &NavigationReset) -> Result<usize> {
        let mut handled = 0;
        loop {
            match self.rx.try_recv() {
                Ok(NavigationCompleted) => {
                    reset.navigation_completed()?;
                    handled += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return Ok(handled),
            }
        }
    }

    /// Block applying navigations until every queue handle is dropped.
    pub fn forward_into(self, reset: &NavigationReset) -> Result<()> {
        for _event in self.rx.iter() {
            reset.navigation_completed()?;
        }
        tracing::debug!("navigation queue closed");
        Ok(())
    }
}

#[must_use]
pub fn navigation_queue() -> (NavigationQueue, NavigationEvents) {
    let (tx, rx) = unbounded();
    (NavigationQueue { tx }, NavigationEvents { rx })
}
