//! Background approval polling for the pending-approval page.
//!
//! Approval happens asynchronously on the admin side, so the pending page
//! re-checks on a timer and whenever the window regains focus. The task is
//! owned by a [`PollerHandle`]; cancelling or dropping the handle tears the
//! timer down, so navigating away cannot leak an orphaned loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use dealerdash_core::stats::ApprovalStatus;

use crate::api::ApiClient;
use crate::gate::DASHBOARD_PATH;

/// Sent exactly once, on the first observation of an approved agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalGranted {
    pub redirect: &'static str,
}

pub struct ApprovalPoller;

impl ApprovalPoller {
    /// Spawn the poll loop. It checks immediately, then every `interval`.
    /// The returned receiver yields [`ApprovalGranted`] when the backend
    /// first reports approval, after which the loop stops on its own.
    pub fn start(
        api: ApiClient,
        interval: Duration,
    ) -> (PollerHandle, mpsc::Receiver<ApprovalGranted>) {
        let (tx, rx) = mpsc::channel(1);
        let wake = Arc::new(Notify::new());
        let task = tokio::spawn(run_poll_loop(api, interval, Arc::clone(&wake), tx));
        (PollerHandle { task, wake }, rx)
    }
}

/// Owns the background task. Lives exactly as long as the pending-approval
/// page is mounted.
pub struct PollerHandle {
    task: JoinHandle<()>,
    wake: Arc<Notify>,
}

impl PollerHandle {
    /// Force an immediate re-check, e.g. when the window regains focus.
    pub fn poke(&self) {
        self.wake.notify_one();
    }

    /// Stop polling. Dropping the handle has the same effect.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_poll_loop(
    api: ApiClient,
    interval: Duration,
    wake: Arc<Notify>,
    tx: mpsc::Sender<ApprovalGranted>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = wake.notified() => {}
        }
        match api.get_onboarding_status().await {
            Ok(status) if status.approval_status == ApprovalStatus::Approved => {
                let _ = tx
                    .send(ApprovalGranted {
                        redirect: DASHBOARD_PATH,
                    })
                    .await;
                return;
            }
            Ok(_) => {}
            // A failed tick is not a retry condition; the next scheduled
            // tick re-checks anyway.
            Err(err) => debug!(error = %err, "approval poll tick failed"),
        }
    }
}
