//! The bypass workflow: verify a submitted secret, persist the record.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sitegate_config::GateConfig;
use sitegate_store::BypassStore;
use sitegate_utils::clock::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::record::BypassRecord;

/// Denial reasons surfaced to the caller.
///
/// None of these escalate: no lockout, no attempt counter. The workflow
/// accepts a fresh submission after any of them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BypassError {
    /// Submitting an empty candidate is disallowed.
    #[error("no secret was provided")]
    EmptySecret,

    /// The candidate does not match the configured secret.
    #[error("the provided secret does not match")]
    SecretMismatch,

    /// Another submission is still verifying; this one was ignored.
    #[error("a verification attempt is already in progress")]
    AttemptInFlight,

    /// The record write failed, so the grant did not happen.
    #[error("failed to persist bypass record: {reason}")]
    Persist { reason: String },
}

/// Observable workflow state, one visitor interaction at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Verifying,
    Granted,
    Denied,
}

/// Verifies a submitted secret and writes the bypass record on success.
///
/// Verification is a plain equality check against the single configured
/// secret; an explicit simplification, not a security boundary.
pub struct BypassWorkflow {
    secret: String,
    store: Arc<dyn BypassStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<WorkflowState>,
}

impl BypassWorkflow {
    #[must_use]
    pub fn new(config: &GateConfig, store: Arc<dyn BypassStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: config.secret().to_string(),
            store,
            clock,
            state: Mutex::new(WorkflowState::Idle),
        }
    }

    /// Current state, for hosts rendering a pending indicator.
    #[must_use]
    pub fn state(&self) -> WorkflowState {
        *self.guard()
    }

    /// Clear a previous denial; hosts call this when the visitor edits the
    /// candidate secret. No-op in any other state.
    pub fn reset(&self) {
        let mut state = self.guard();
        if *state == WorkflowState::Denied {
            *state = WorkflowState::Idle;
        }
    }

    /// Submit a candidate secret.
    ///
    /// Resolves as soon as verification and the record write complete; any
    /// cosmetic pacing belongs to the caller. A submission while another is
    /// still verifying leaves all state untouched and reports
    /// [`BypassError::AttemptInFlight`]. The grant is declared only after
    /// the write fully succeeds; a failed write denies and writes nothing.
    pub async fn submit(&self, candidate: &str) -> Result<BypassRecord, BypassError> {
        if candidate.is_empty() {
            return Err(BypassError::EmptySecret);
        }

        {
            let mut state = self.guard();
            if *state == WorkflowState::Verifying {
                return Err(BypassError::AttemptInFlight);
            }
            // A new submission supersedes a previous denial or grant.
            *state = WorkflowState::Verifying;
        }

        if candidate != self.secret {
            self.set_state(WorkflowState::Denied);
            return Err(BypassError::SecretMismatch);
        }

        let record = BypassRecord::issue_at(self.clock.now_ms());
        match self.persist(record).await {
            Ok(()) => {
                self.set_state(WorkflowState::Granted);
                info!(expires_at_ms = record.expires_at_ms, "bypass granted");
                Ok(record)
            }
            Err(e) => {
                self.set_state(WorkflowState::Denied);
                warn!(error = %e, "bypass record write failed; denying");
                Err(e)
            }
        }
    }

    /// Run the slot write off the cooperative scheduler.
    async fn persist(&self, record: BypassRecord) -> Result<(), BypassError> {
        let json = record.to_json().map_err(|e| BypassError::Persist {
            reason: e.to_string(),
        })?;
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.set(&json))
            .await
            .map_err(|e| BypassError::Persist {
                reason: e.to_string(),
            })?
            .map_err(|e| BypassError::Persist {
                reason: e.to_string(),
            })
    }

    fn set_state(&self, next: WorkflowState) {
        *self.guard() = next;
    }

    fn guard(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn force_state(&self, state: WorkflowState) {
        self.set_state(state);
    }
}
