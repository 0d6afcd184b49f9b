//! # Upload Slot
//!
//! At most one upload is in flight at a time. A [`SlotGuard`] holds the
//! slot and publishes `Busy` while it lives; dropping it (success, failure
//! or cancellation alike) publishes `Idle` again. Observers follow the
//! state through a `watch` channel.

use crate::errors::UploadError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// What happens to a selection made while an upload is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadPolicy {
    /// Refuse it immediately
    #[default]
    Reject,

    /// Let one selection wait for the slot; further ones are refused
    QueueOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Busy,
}

#[derive(Debug, Clone)]
pub struct UploadSlot {
    permits: Arc<Semaphore>,
    waiting: Arc<AtomicBool>,
    state: Arc<watch::Sender<UploadState>>,
    policy: UploadPolicy,
}

impl UploadSlot {
    pub fn new(policy: UploadPolicy) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            permits: Arc::new(Semaphore::new(1)),
            waiting: Arc::new(AtomicBool::new(false)),
            state: Arc::new(state),
            policy,
        }
    }

    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    pub fn state(&self) -> UploadState {
        *self.state.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// Take the slot, or wait for it under [`UploadPolicy::QueueOne`]
    pub async fn acquire(&self) -> Result<SlotGuard, UploadError> {
        match Arc::clone(&self.permits).try_acquire_owned() {
            Ok(permit) => return Ok(SlotGuard::new(permit, Arc::clone(&self.state))),
            Err(tokio::sync::TryAcquireError::Closed) => return Err(UploadError::SlotClosed),
            Err(tokio::sync::TryAcquireError::NoPermits) => {}
        }

        if self.policy == UploadPolicy::Reject {
            debug!("Upload rejected, slot busy");
            return Err(UploadError::SlotBusy);
        }

        if self.waiting.swap(true, Ordering::AcqRel) {
            debug!("Upload rejected, queue full");
            return Err(UploadError::QueueFull);
        }
        let _waiting = WaitingFlag(&self.waiting);

        debug!("Upload queued behind the in-flight one");
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| UploadError::SlotClosed)?;
        Ok(SlotGuard::new(permit, Arc::clone(&self.state)))
    }

    /// Refuse every current and future acquisition
    pub fn close(&self) {
        self.permits.close();
    }
}

impl Default for UploadSlot {
    fn default() -> Self {
        Self::new(UploadPolicy::default())
    }
}

/// Clears the waiting flag when the queued acquisition ends or is cancelled
struct WaitingFlag<'a>(&'a AtomicBool);

impl Drop for WaitingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Exclusive hold on the upload slot
#[derive(Debug)]
pub struct SlotGuard {
    _permit: OwnedSemaphorePermit,
    state: Arc<watch::Sender<UploadState>>,
}

impl SlotGuard {
    fn new(permit: OwnedSemaphorePermit, state: Arc<watch::Sender<UploadState>>) -> Self {
        state.send_replace(UploadState::Busy);
        Self {
            _permit: permit,
            state,
        }
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        // Published before the permit is returned, so a queued upload's
        // Busy always lands after this Idle
        self.state.send_replace(UploadState::Idle);
    }
}
