//! The persisted bypass record.

use serde::{Deserialize, Serialize};

/// Validity window granted on successful verification: 24 hours. Fixed, no
/// renewal, no sliding window.
pub const BYPASS_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Evidence that a visitor supplied the correct secret, with an expiry.
///
/// Stored as `{"granted":true,"expiresAt":<ms since epoch>}`. Absence of a
/// record is the "no bypass" state; the write path only ever produces
/// `granted == true` with a future expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassRecord {
    /// Always true when written; a stored false marks a dead record.
    pub granted: bool,
    /// Absolute expiry in milliseconds since the UNIX epoch.
    #[serde(rename = "expiresAt")]
    pub expires_at_ms: i64,
}

impl BypassRecord {
    /// Issue a fresh record valid for [`BYPASS_WINDOW_MS`] from `now_ms`.
    #[must_use]
    pub fn issue_at(now_ms: i64) -> Self {
        Self {
            granted: true,
            expires_at_ms: now_ms.saturating_add(BYPASS_WINDOW_MS),
        }
    }

    /// Whether this record lifts the block at `now_ms`.
    ///
    /// The boundary is exclusive: a record with `expiresAt == now` is
    /// already dead.
    #[must_use]
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        self.granted && self.expires_at_ms > now_ms
    }

    /// Parse a raw slot value.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Serialize for the storage slot.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
