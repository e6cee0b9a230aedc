//! Scroll synchronizer.
//!
//! Propagating a row offset from one pane to the other re-fires the target
//! pane's own change notification, which would ping-pong forever. The guard
//! here is a single-slot, non-blocking acquire: the first notification in a
//! redraw cycle wins, a notification arriving while Syncing is dropped, and
//! the slot is always released before the propagation returns. It must
//! never block — the re-entry happens synchronously inside the same event
//! handler, so a blocking wait would deadlock.

use std::sync::atomic::{AtomicBool, Ordering};

/// Observable guard state, mostly for tests and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Syncing,
}

/// Reentrancy guard for scroll propagation between the two panes.
#[derive(Debug, Default)]
pub struct ScrollSync {
    syncing: AtomicBool,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to enter the Syncing state. Returns None when a propagation is
    /// already in flight (the caller drops the event). The returned token
    /// releases the slot on drop.
    pub fn begin(&self) -> Option<SyncToken<'_>> {
        self.syncing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .ok()?;
        Some(SyncToken { owner: self })
    }

    pub fn state(&self) -> SyncState {
        if self.syncing.load(Ordering::Acquire) {
            SyncState::Syncing
        } else {
            SyncState::Idle
        }
    }
}

pub struct SyncToken<'a> {
    owner: &'a ScrollSync,
}

impl Drop for SyncToken<'_> {
    fn drop(&mut self) {
        self.owner.syncing.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_enters_syncing_and_drop_releases() {
        let sync = ScrollSync::new();
        assert_eq!(sync.state(), SyncState::Idle);

        let token = sync.begin().expect("guard should be free");
        assert_eq!(sync.state(), SyncState::Syncing);

        drop(token);
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn reentrant_begin_is_dropped() {
        let sync = ScrollSync::new();
        let _token = sync.begin().unwrap();
        assert!(sync.begin().is_none());
    }

    #[test]
    fn guard_is_reusable_after_release() {
        let sync = ScrollSync::new();
        drop(sync.begin().unwrap());
        assert!(sync.begin().is_some());
    }
}
