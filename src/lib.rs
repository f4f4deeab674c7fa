//! sitegate - site-wide maintenance gate with an operator bypass
//!
//! sitegate decides, for every incoming page view, whether the host
//! application should render its real content or a blocking maintenance
//! interstitial, and lets an operator-held secret lift the block for a
//! bounded window per visitor.
//!
//! Two elements form the core:
//!
//! - the **gate evaluator**: a synchronous, reentrant decision combining the
//!   process-wide maintenance flag with a locally persisted bypass record
//!   into a single boolean (blocked or not), failing closed on every storage
//!   problem;
//! - the **bypass workflow**: a small state machine
//!   (`Idle -> Verifying -> Granted | Denied`) that verifies a submitted
//!   secret and, on success, persists a record valid for 24 hours.
//!
//! Everything visual (interstitial markup, pacing delays, redirects) belongs
//! to the embedding host; this crate only answers "blocked?" and "does this
//! secret lift the block?".
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sitegate::{GateConfig, MaintenanceGate, MemoryStore};
//!
//! # async fn demo() -> Result<(), sitegate::BypassError> {
//! let gate = MaintenanceGate::new(GateConfig::from_env(), Arc::new(MemoryStore::new()));
//!
//! if gate.is_blocked() {
//!     let record = gate.request_bypass("precure_rainbow").await?;
//!     assert!(record.granted);
//!     assert!(!gate.is_blocked());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Production hosts typically construct the gate with
//! [`MaintenanceGate::from_env`], which reads `MAINTENANCE_MODE_ENABLED` and
//! `MAINTENANCE_PASSWORD` and persists the record under the platform's local
//! data directory. Contexts without usable persistence (prerendering, batch
//! jobs) automatically fall back to [`UnavailableStore`] and fail closed.

pub use sitegate_config::{
    ConfigSource, DEFAULT_SECRET, ENV_MAINTENANCE_ENABLED, ENV_MAINTENANCE_SECRET, GateConfig,
};
pub use sitegate_gate::{
    BYPASS_WINDOW_MS, BypassError, BypassRecord, BypassWorkflow, DecisionReason, GateDecision,
    GateEvaluator, MaintenanceGate, WorkflowState,
};
pub use sitegate_store::{BypassStore, FileStore, MemoryStore, StoreError, UnavailableStore};
pub use sitegate_utils::clock::{Clock, SystemClock};
pub use sitegate_utils::logging::init_tracing;
