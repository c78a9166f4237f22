/// Metadata key holding the timestamp of the last successful refresh.
pub const LAST_REFRESHED_AT_KEY: &str = "last_refreshed_at";

/// Inclusive bounds of the random multiplier used by the GDP estimate.
pub const GDP_MULTIPLIER_MIN: u32 = 1000;
pub const GDP_MULTIPLIER_MAX: u32 = 2000;

/// Currency that always converts at 1.0 when the rate table omits it.
pub const BASE_CURRENCY: &str = "USD";

/// Number of countries listed in the chart summary.
pub const CHART_TOP_COUNTRIES: usize = 5;

pub const DEFAULT_CHART_PATH: &str = "cache/summary.png";
