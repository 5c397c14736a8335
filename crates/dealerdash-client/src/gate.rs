//! Onboarding/approval access gate.
//!
//! Every navigation re-evaluates the gate from scratch: no state is carried
//! between route changes. The outcome tells the shell whether the page may
//! render and where to redirect when it may not.

use tracing::warn;

use dealerdash_core::stats::{ApprovalStatus, OnboardingState, OnboardingStatus};

use crate::api::ApiClient;
use crate::poller::{ApprovalGranted, ApprovalPoller, PollerHandle};

pub const LOGIN_PATH: &str = "/auth/login";
pub const ONBOARDING_PATH: &str = "/agency/onboarding";
pub const PENDING_APPROVAL_PATH: &str = "/agency/pending-approval";
pub const DASHBOARD_PATH: &str = "/agency/dashboard";
const AUTH_PATH_PREFIX: &str = "/auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Check still in flight. The shell shows a neutral loader and nothing
    /// else — protected content must not flash while this resolves.
    Unknown,
    Allowed,
    DeniedNoSession,
    DeniedOnboardingIncomplete,
    DeniedPendingApproval,
}

impl GateState {
    /// Whether the shell may render the page behind the gate. Denied states
    /// render nothing: the redirect is already in flight.
    pub fn renders_children(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub state: GateState,
    pub redirect: Option<&'static str>,
}

impl GateOutcome {
    fn allow() -> Self {
        Self {
            state: GateState::Allowed,
            redirect: None,
        }
    }

    fn deny(state: GateState, redirect: &'static str) -> Self {
        Self {
            state,
            redirect: Some(redirect),
        }
    }
}

pub struct AccessGate {
    api: ApiClient,
}

impl AccessGate {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Evaluate the transition rules for a navigation to `path`, in strict
    /// order:
    ///
    /// 1. no session token → denied, redirect to login;
    /// 2. auth pages are always reachable;
    /// 3. the onboarding page is always reachable (it must stay usable while
    ///    the profile is incomplete);
    /// 4. fetch the approval state; any failure is treated as an invalid
    ///    session (fail closed, never into protected content);
    /// 5. onboarding incomplete → redirect to onboarding;
    /// 6. not approved → allowed only on the pending-approval page;
    /// 7. otherwise allowed.
    pub async fn evaluate(&self, path: &str) -> GateOutcome {
        if self.api.session().token().is_none() {
            return GateOutcome::deny(GateState::DeniedNoSession, LOGIN_PATH);
        }
        if path.starts_with(AUTH_PATH_PREFIX) {
            return GateOutcome::allow();
        }
        if path == ONBOARDING_PATH {
            return GateOutcome::allow();
        }

        let status = match self.api.get_onboarding_status().await {
            Ok(status) => status,
            Err(err) => {
                warn!(error = %err, "approval check failed, treating session as invalid");
                return GateOutcome::deny(GateState::DeniedNoSession, LOGIN_PATH);
            }
        };
        decide(path, &status)
    }

    /// Start the recurring approval re-check. Call this when a navigation
    /// lands `Allowed` on the pending-approval page; drop or cancel the
    /// handle the moment the path changes away or the page unmounts.
    pub fn watch_approval(
        &self,
        interval: std::time::Duration,
    ) -> (PollerHandle, tokio::sync::mpsc::Receiver<ApprovalGranted>) {
        ApprovalPoller::start(self.api.clone(), interval)
    }
}

/// The pure tail of the transition rules, once the approval state is known.
fn decide(path: &str, status: &OnboardingStatus) -> GateOutcome {
    if status.onboarding_status != OnboardingState::Completed {
        return GateOutcome::deny(GateState::DeniedOnboardingIncomplete, ONBOARDING_PATH);
    }
    if status.approval_status != ApprovalStatus::Approved {
        if path == PENDING_APPROVAL_PATH {
            return GateOutcome::allow();
        }
        return GateOutcome::deny(GateState::DeniedPendingApproval, PENDING_APPROVAL_PATH);
    }
    GateOutcome::allow()
}
