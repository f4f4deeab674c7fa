//! The gate evaluator: blocked or not, fail closed.

use std::sync::Arc;

use sitegate_config::GateConfig;
use sitegate_store::BypassStore;
use sitegate_utils::clock::Clock;
use tracing::{debug, info, warn};

use crate::record::BypassRecord;

/// Why an evaluation came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// The maintenance flag is off; storage was never consulted.
    MaintenanceDisabled,
    /// A valid, unexpired bypass record was found.
    BypassActive,
    /// No record exists for this visitor.
    NoRecord,
    /// A record existed but cannot support a bypass any more; it was purged.
    RecordExpired,
    /// The stored value did not parse as a record; it was purged.
    RecordMalformed,
    /// Persistent storage cannot be used in this context.
    StoreUnavailable,
    /// The storage read itself failed.
    ReadFailed,
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// True means the host renders the blocking interstitial.
    pub blocked: bool,
    pub reason: DecisionReason,
}

impl GateDecision {
    fn blocked(reason: DecisionReason) -> Self {
        Self {
            blocked: true,
            reason,
        }
    }

    fn open(reason: DecisionReason) -> Self {
        Self {
            blocked: false,
            reason,
        }
    }
}

/// Decides blocked/not-blocked from the maintenance flag and the stored
/// bypass record.
///
/// Reentrant: one read and, rarely, one idempotent delete per call, so
/// concurrent render passes need no coordination. Every storage failure
/// evaluates to blocked; nothing propagates to the caller.
pub struct GateEvaluator {
    enabled: bool,
    store: Arc<dyn BypassStore>,
    clock: Arc<dyn Clock>,
}

impl GateEvaluator {
    #[must_use]
    pub fn new(config: &GateConfig, store: Arc<dyn BypassStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            enabled: config.maintenance_enabled(),
            store,
            clock,
        }
    }

    /// The boolean gate contract: true means blocked.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        self.decide().blocked
    }

    /// Full decision with its reason, for hosts that log or display it.
    #[must_use]
    pub fn decide(&self) -> GateDecision {
        let decision = self.decide_inner();
        debug!(blocked = decision.blocked, reason = ?decision.reason, "gate evaluated");
        decision
    }

    fn decide_inner(&self) -> GateDecision {
        // The disabled flag short-circuits before any storage access.
        if !self.enabled {
            return GateDecision::open(DecisionReason::MaintenanceDisabled);
        }

        if !self.store.is_available() {
            return GateDecision::blocked(DecisionReason::StoreUnavailable);
        }

        let raw = match self.store.get() {
            Ok(Some(raw)) => raw,
            Ok(None) => return GateDecision::blocked(DecisionReason::NoRecord),
            Err(e) => {
                warn!(error = %e, "bypass slot read failed; failing closed");
                return GateDecision::blocked(DecisionReason::ReadFailed);
            }
        };

        let record = match BypassRecord::parse(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "stored bypass record is malformed; purging");
                self.purge();
                return GateDecision::blocked(DecisionReason::RecordMalformed);
            }
        };

        if record.is_active_at(self.clock.now_ms()) {
            return GateDecision::open(DecisionReason::BypassActive);
        }

        // Also reached by a record claiming granted == false, which cannot
        // support a bypass either way.
        info!(expires_at_ms = record.expires_at_ms, "bypass record expired; purging");
        self.purge();
        GateDecision::blocked(DecisionReason::RecordExpired)
    }

    /// Best-effort delete of a dead record. A failed purge still blocks, so
    /// the error is logged and swallowed.
    fn purge(&self) {
        if let Err(e) = self.store.delete() {
            warn!(error = %e, "failed to purge dead bypass record");
        }
    }
}
