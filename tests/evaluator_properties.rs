//! Property-based tests for the gate evaluator's invariants.
//!
//! Case counts can be raised via `PROPTEST_CASES` for thorough local runs:
//!
//! ```bash
//! PROPTEST_CASES=256 cargo test --test evaluator_properties
//! ```

use proptest::prelude::*;
use std::sync::Arc;

use sitegate::{
    BypassRecord, BypassStore, Clock, GateConfig, MaintenanceGate, MemoryStore,
};
use sitegate_utils::clock::MockClock;

/// Default number of test cases per property when PROPTEST_CASES is unset.
const DEFAULT_PROPTEST_CASES: u32 = 64;

fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

fn gate_over(enabled: bool, store: &Arc<MemoryStore>, now_ms: i64) -> MaintenanceGate {
    MaintenanceGate::with_clock(
        GateConfig::new(enabled, "sekrit"),
        Arc::clone(store) as Arc<dyn BypassStore>,
        Arc::new(MockClock::new(now_ms)) as Arc<dyn Clock>,
    )
}

proptest! {
    #![proptest_config(proptest_config())]

    /// With the flag off the gate never blocks, whatever the slot holds.
    #[test]
    fn disabled_flag_never_blocks(slot in proptest::option::of(".*")) {
        let store = Arc::new(MemoryStore::new());
        if let Some(raw) = &slot {
            store.set(raw).unwrap();
        }

        let gate = gate_over(false, &store, 0);
        prop_assert!(!gate.is_blocked());
        // Side-effect free: the slot is untouched.
        prop_assert_eq!(store.snapshot(), slot);
    }

    /// Any slot value that is not a record blocks, and the junk is purged.
    #[test]
    fn junk_slot_blocks_and_purges(raw in ".*") {
        prop_assume!(BypassRecord::parse(&raw).is_err());

        let store = Arc::new(MemoryStore::new());
        store.set(&raw).unwrap();

        let gate = gate_over(true, &store, 0);
        prop_assert!(gate.is_blocked());
        prop_assert!(store.snapshot().is_none());
    }

    /// Blocked exactly when the expiry is not in the future.
    #[test]
    fn window_boundary_is_exact(
        now in 0i64..4_102_444_800_000,
        offset in -86_400_000i64..86_400_000,
    ) {
        let store = Arc::new(MemoryStore::new());
        let record = BypassRecord { granted: true, expires_at_ms: now + offset };
        store.set(&record.to_json().unwrap()).unwrap();

        let gate = gate_over(true, &store, now);
        prop_assert_eq!(gate.is_blocked(), offset <= 0);
    }

    /// A freshly issued record is active for its whole window and dead after.
    #[test]
    fn issued_record_covers_its_window(
        issued_at in 0i64..4_102_444_800_000,
        elapsed in 0i64..2 * sitegate::BYPASS_WINDOW_MS,
    ) {
        let record = BypassRecord::issue_at(issued_at);
        let active = record.is_active_at(issued_at + elapsed);
        prop_assert_eq!(active, elapsed < sitegate::BYPASS_WINDOW_MS);
    }
}
