use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Result of one successful refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshOutcome {
    /// Rows written to the store.
    pub inserted: usize,
    /// Upstream entries dropped as malformed or duplicate.
    pub skipped: usize,
    /// Stored rows whose currency had no exchange rate.
    pub missing_rates: usize,
    pub refreshed_at: NaiveDateTime,
}
