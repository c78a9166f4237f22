//! In-memory repositories shared by the unit tests of this crate.

use crate::constants::LAST_REFRESHED_AT_KEY;
use crate::countries::{
    Country, CountryFilter, CountryRepositoryTrait, CountrySort, NewCountry,
    ValidatedCountryUpsert,
};
use crate::errors::{DatabaseError, Result};
use crate::metadata::MetadataRepositoryTrait;
use crate::utils::time_utils::format_stored_timestamp;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 22)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap()
}

pub fn sample_country(
    id: i32,
    name: &str,
    region: Option<&str>,
    currency_code: Option<&str>,
    estimated_gdp: Option<f64>,
) -> Country {
    Country {
        id,
        name: name.to_string(),
        capital: None,
        region: region.map(str::to_string),
        population: 1_000_000,
        currency_code: currency_code.map(str::to_string),
        exchange_rate: currency_code.map(|_| 1.5),
        estimated_gdp,
        flag_url: None,
        last_refreshed_at: fixed_time(),
    }
}

#[derive(Default)]
pub struct InMemoryMetadataStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryMetadataStore {
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl MetadataRepositoryTrait for InMemoryMetadataStore {
    fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Mirrors the SQLite repository closely enough for service tests: names
/// are unique ignoring ASCII case and `replace_all` is all-or-nothing.
#[derive(Default)]
pub struct InMemoryCountryStore {
    rows: Mutex<Vec<Country>>,
    metadata: Arc<InMemoryMetadataStore>,
}

impl InMemoryCountryStore {
    pub fn with_countries(countries: Vec<Country>) -> Self {
        Self {
            rows: Mutex::new(countries),
            metadata: Arc::new(InMemoryMetadataStore::default()),
        }
    }

    pub fn metadata(&self) -> Arc<InMemoryMetadataStore> {
        self.metadata.clone()
    }

    pub fn snapshot(&self) -> Vec<Country> {
        self.rows.lock().unwrap().clone()
    }

    fn next_id(rows: &[Country]) -> i32 {
        rows.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }
}

fn eq_opt(value: &Option<String>, wanted: &str) -> bool {
    value
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case(wanted))
}

fn by_gdp(a: &Country, b: &Country, sort: CountrySort) -> Ordering {
    match (a.estimated_gdp, b.estimated_gdp) {
        (Some(x), Some(y)) => match sort {
            CountrySort::GdpAsc => x.total_cmp(&y),
            CountrySort::GdpDesc => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl CountryRepositoryTrait for InMemoryCountryStore {
    fn list_countries(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        let mut rows: Vec<Country> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filter.region.as_deref().map_or(true, |r| eq_opt(&c.region, r)))
            .filter(|c| {
                filter
                    .currency
                    .as_deref()
                    .map_or(true, |code| eq_opt(&c.currency_code, code))
            })
            .cloned()
            .collect();
        if let Some(sort) = filter.sort {
            rows.sort_by(|a, b| by_gdp(a, b, sort));
        }
        Ok(rows)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Country>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn count_countries(&self) -> Result<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn delete_by_name(&self, name: &str) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| !c.name.eq_ignore_ascii_case(name));
        Ok(before - rows.len())
    }

    async fn upsert_country(
        &self,
        upsert: ValidatedCountryUpsert,
        now: NaiveDateTime,
    ) -> Result<Country> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(upsert.name()))
        {
            upsert.apply_to(existing, now);
            return Ok(existing.clone());
        }
        let id = Self::next_id(&rows);
        let new = upsert.into_new_country(now);
        let country = from_new(id, new);
        rows.push(country.clone());
        Ok(country)
    }

    async fn replace_all(
        &self,
        countries: Vec<NewCountry>,
        refreshed_at: NaiveDateTime,
    ) -> Result<usize> {
        let mut seen: Vec<String> = Vec::new();
        for c in &countries {
            let key = c.name.to_ascii_lowercase();
            if seen.contains(&key) {
                return Err(DatabaseError::UniqueViolation(c.name.clone()).into());
            }
            seen.push(key);
        }
        let replaced: Vec<Country> = countries
            .into_iter()
            .enumerate()
            .map(|(i, c)| from_new(i as i32 + 1, c))
            .collect();
        let count = replaced.len();
        *self.rows.lock().unwrap() = replaced;
        self.metadata
            .insert(LAST_REFRESHED_AT_KEY, &format_stored_timestamp(refreshed_at));
        Ok(count)
    }
}

fn from_new(id: i32, c: NewCountry) -> Country {
    Country {
        id,
        name: c.name,
        capital: c.capital,
        region: c.region,
        population: c.population,
        currency_code: c.currency_code,
        exchange_rate: c.exchange_rate,
        estimated_gdp: c.estimated_gdp,
        flag_url: c.flag_url,
        last_refreshed_at: c.last_refreshed_at,
    }
}
