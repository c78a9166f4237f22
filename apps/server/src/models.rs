use country_currency_core::countries as core_countries;
use country_currency_core::utils::time_utils::format_utc_iso;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Listing entry. Internal identifiers are left out.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
}

impl From<core_countries::Country> for CountrySummary {
    fn from(c: core_countries::Country) -> Self {
        Self {
            name: c.name,
            capital: c.capital,
            region: c.region,
            population: c.population,
            currency_code: c.currency_code,
            exchange_rate: c.exchange_rate,
            estimated_gdp: c.estimated_gdp,
            flag_url: c.flag_url,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    /// ISO-8601, UTC
    pub last_refreshed_at: String,
}

impl From<core_countries::Country> for Country {
    fn from(c: core_countries::Country) -> Self {
        Self {
            id: c.id,
            name: c.name,
            capital: c.capital,
            region: c.region,
            population: c.population,
            currency_code: c.currency_code,
            exchange_rate: c.exchange_rate,
            estimated_gdp: c.estimated_gdp,
            flag_url: c.flag_url,
            last_refreshed_at: format_utc_iso(c.last_refreshed_at),
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct CountryQuery {
    /// Case-insensitive region filter
    pub region: Option<String>,
    /// Case-insensitive currency code filter
    pub currency: Option<String>,
    /// `gdp_asc` or `gdp_desc`
    pub sort: Option<String>,
}

impl CountryQuery {
    pub fn into_filter(self) -> core_countries::CountryFilter {
        core_countries::CountryFilter::from_query(self.region, self.currency, self.sort.as_deref())
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RefreshResponse {
    pub message: String,
    /// `None` when the chart could not be regenerated.
    pub chart_path: Option<String>,
    pub last_refreshed_at: String,
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub total_countries: i64,
    pub last_refreshed_at: Option<String>,
}

impl From<core_countries::RefreshStatus> for StatusResponse {
    fn from(s: core_countries::RefreshStatus) -> Self {
        Self {
            total_countries: s.total_countries,
            last_refreshed_at: s.last_refreshed_at.map(format_utc_iso),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
