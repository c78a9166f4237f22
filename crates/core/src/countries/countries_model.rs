//! Country domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A stored country record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    /// Units of local currency per 1 USD.
    pub exchange_rate: Option<f64>,
    /// Synthetic figure, see `refresh::gdp`.
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: NaiveDateTime,
}

/// A country ready to be inserted. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCountry {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: NaiveDateTime,
}

/// Structured insert-or-update input, matched on `name` case-insensitively.
///
/// `None` means "not provided": on update the stored value is kept. Only the
/// fields listed here can ever be written, whatever the caller sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CountryUpsert {
    pub name: Option<String>,
    pub population: Option<i64>,
    pub currency_code: Option<String>,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
}

/// A `CountryUpsert` whose required fields have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCountryUpsert {
    name: String,
    population: i64,
    currency_code: String,
    capital: Option<String>,
    region: Option<String>,
    exchange_rate: Option<f64>,
    estimated_gdp: Option<f64>,
    flag_url: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl CountryUpsert {
    pub const REQUIRED_FIELDS: [&'static str; 3] = ["name", "population", "currency_code"];

    /// Checks required fields and returns every missing one at once.
    pub fn validate(self) -> Result<ValidatedCountryUpsert> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name".to_string());
        }
        if self.population.is_none() {
            missing.push("population".to_string());
        }
        if is_blank(&self.currency_code) {
            missing.push("currency_code".to_string());
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing).into());
        }

        let population = self.population.unwrap_or_default();
        if population < 0 {
            return Err(ValidationError::InvalidInput(format!(
                "population must not be negative, got {}",
                population
            ))
            .into());
        }

        Ok(ValidatedCountryUpsert {
            name: self.name.unwrap_or_default().trim().to_string(),
            population,
            currency_code: self.currency_code.unwrap_or_default().trim().to_string(),
            capital: self.capital,
            region: self.region,
            exchange_rate: self.exchange_rate,
            estimated_gdp: self.estimated_gdp,
            flag_url: self.flag_url,
        })
    }
}

impl ValidatedCountryUpsert {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Overwrites the provided attributes of an existing record. The stored
    /// name keeps its original spelling.
    pub fn apply_to(&self, existing: &mut Country, now: NaiveDateTime) {
        existing.population = self.population;
        existing.currency_code = Some(self.currency_code.clone());
        if let Some(capital) = &self.capital {
            existing.capital = Some(capital.clone());
        }
        if let Some(region) = &self.region {
            existing.region = Some(region.clone());
        }
        if let Some(rate) = self.exchange_rate {
            existing.exchange_rate = Some(rate);
        }
        if let Some(gdp) = self.estimated_gdp {
            existing.estimated_gdp = Some(gdp);
        }
        if let Some(flag_url) = &self.flag_url {
            existing.flag_url = Some(flag_url.clone());
        }
        if !gdp_allowed(existing.population, existing.exchange_rate) {
            existing.estimated_gdp = None;
        }
        existing.last_refreshed_at = now;
    }

    pub fn into_new_country(self, now: NaiveDateTime) -> NewCountry {
        let estimated_gdp = self
            .estimated_gdp
            .filter(|_| gdp_allowed(self.population, self.exchange_rate));
        NewCountry {
            name: self.name,
            capital: self.capital,
            region: self.region,
            population: self.population,
            currency_code: Some(self.currency_code),
            exchange_rate: self.exchange_rate,
            estimated_gdp,
            flag_url: self.flag_url,
            last_refreshed_at: now,
        }
    }
}

/// A GDP estimate only makes sense with people and a usable rate.
pub fn gdp_allowed(population: i64, exchange_rate: Option<f64>) -> bool {
    population > 0 && exchange_rate.is_some_and(|r| r.is_finite() && r > 0.0)
}

/// Ordering applied to country listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySort {
    GdpAsc,
    GdpDesc,
}

impl CountrySort {
    /// Parses the query value. Anything but the two exact keywords means
    /// "no ordering".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gdp_asc" => Some(CountrySort::GdpAsc),
            "gdp_desc" => Some(CountrySort::GdpDesc),
            _ => None,
        }
    }
}

/// Listing filters. String filters compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryFilter {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<CountrySort>,
}

impl CountryFilter {
    /// Builds a filter from raw query values. Empty strings count as absent.
    pub fn from_query(
        region: Option<String>,
        currency: Option<String>,
        sort: Option<&str>,
    ) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            region: non_empty(region),
            currency: non_empty(currency),
            sort: sort.and_then(CountrySort::parse),
        }
    }
}

/// Row count plus the last successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshStatus {
    pub total_countries: i64,
    pub last_refreshed_at: Option<NaiveDateTime>,
}
