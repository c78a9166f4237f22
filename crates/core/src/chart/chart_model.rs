use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    pub region: String,
    pub total_gdp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCountry {
    pub name: String,
    pub estimated_gdp: f64,
}

/// Aggregates drawn on the summary chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpSummary {
    /// Sorted by total, largest first.
    pub regions: Vec<RegionTotal>,
    pub top_countries: Vec<TopCountry>,
    pub total_countries: usize,
    pub last_refreshed_at: Option<NaiveDateTime>,
}
