//! Host-facing facade tying config, store, evaluator and workflow together.

use std::sync::Arc;

use sitegate_config::GateConfig;
use sitegate_store::{BypassStore, FileStore, UnavailableStore};
use sitegate_utils::clock::{Clock, SystemClock};
use tracing::warn;

use crate::evaluator::{GateDecision, GateEvaluator};
use crate::record::BypassRecord;
use crate::workflow::{BypassError, BypassWorkflow, WorkflowState};

/// The site-wide maintenance gate.
///
/// Hosts construct one per process, ask [`is_blocked`](Self::is_blocked) at
/// mount time, and hand control to [`request_bypass`](Self::request_bypass)
/// while blocked.
pub struct MaintenanceGate {
    config: GateConfig,
    store: Arc<dyn BypassStore>,
    evaluator: GateEvaluator,
    workflow: BypassWorkflow,
}

impl MaintenanceGate {
    /// Gate over an explicit store, using the wall clock.
    #[must_use]
    pub fn new(config: GateConfig, store: Arc<dyn BypassStore>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Gate with an injected clock; tests drive simulated time through this.
    #[must_use]
    pub fn with_clock(
        config: GateConfig,
        store: Arc<dyn BypassStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let evaluator = GateEvaluator::new(&config, Arc::clone(&store), Arc::clone(&clock));
        let workflow = BypassWorkflow::new(&config, Arc::clone(&store), clock);
        Self {
            config,
            store,
            evaluator,
            workflow,
        }
    }

    /// Gate from the process environment and the default file store.
    ///
    /// When no per-device data directory exists (a non-interactive execution
    /// context), the gate falls back to the unavailable store and fails
    /// closed whenever the maintenance flag is on.
    #[must_use]
    pub fn from_env() -> Self {
        let config = GateConfig::from_env();
        let store: Arc<dyn BypassStore> = match FileStore::open_default() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(error = format!("{e:#}"), "no usable bypass store; gate will fail closed");
                Arc::new(UnavailableStore)
            }
        };
        Self::new(config, store)
    }

    /// Whether the host should render the blocking interstitial.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.evaluator.evaluate()
    }

    /// The full gate decision with its reason.
    #[must_use]
    pub fn decision(&self) -> GateDecision {
        self.evaluator.decide()
    }

    /// Submit a candidate secret. On success the bypass record is persisted
    /// and the next evaluation is unblocked.
    pub async fn request_bypass(&self, candidate: &str) -> Result<BypassRecord, BypassError> {
        self.workflow.submit(candidate).await
    }

    /// Delete any bypass record unconditionally, forcing re-blocking while
    /// the maintenance flag is on. Best-effort: a failed delete is logged
    /// and swallowed.
    pub fn clear_bypass(&self) {
        if let Err(e) = self.store.delete() {
            warn!(error = %e, "failed to clear bypass record");
        }
    }

    /// Clear any existing bypass and report the resulting evaluation.
    ///
    /// Returns true exactly when the next evaluation is blocked; false means
    /// the maintenance flag itself is off. The flag is config-only and is
    /// not touched here.
    pub fn force_enable(&self) -> bool {
        self.clear_bypass();
        self.is_blocked()
    }

    /// Workflow state, for hosts rendering a pending indicator.
    #[must_use]
    pub fn workflow_state(&self) -> WorkflowState {
        self.workflow.state()
    }

    /// Clear a previous denial when the visitor edits the candidate secret.
    pub fn reset_workflow(&self) {
        self.workflow.reset();
    }

    /// The immutable configuration this gate was built with.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}
