//! Gating core: the persisted bypass record, the gate evaluator, the bypass
//! workflow, and the host-facing [`MaintenanceGate`] facade.

pub mod evaluator;
pub mod gate;
pub mod record;
pub mod workflow;

pub use evaluator::{DecisionReason, GateDecision, GateEvaluator};
pub use gate::MaintenanceGate;
pub use record::{BYPASS_WINDOW_MS, BypassRecord};
pub use workflow::{BypassError, BypassWorkflow, WorkflowState};
