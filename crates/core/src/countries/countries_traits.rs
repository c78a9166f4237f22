use crate::countries::countries_model::{
    Country, CountryFilter, NewCountry, RefreshStatus, ValidatedCountryUpsert,
};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Trait for country repository operations.
///
/// All name lookups are case-insensitive.
#[async_trait]
pub trait CountryRepositoryTrait: Send + Sync {
    fn list_countries(&self, filter: &CountryFilter) -> Result<Vec<Country>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Country>>;
    fn count_countries(&self) -> Result<i64>;
    async fn delete_by_name(&self, name: &str) -> Result<usize>;
    async fn upsert_country(
        &self,
        upsert: ValidatedCountryUpsert,
        now: NaiveDateTime,
    ) -> Result<Country>;

    /// Replaces every stored country with `countries` and records
    /// `refreshed_at` under the last-refresh metadata key, atomically.
    /// On failure nothing changes.
    async fn replace_all(
        &self,
        countries: Vec<NewCountry>,
        refreshed_at: NaiveDateTime,
    ) -> Result<usize>;
}

/// Trait for country service operations.
#[async_trait]
pub trait CountryServiceTrait: Send + Sync {
    fn list_countries(&self, filter: &CountryFilter) -> Result<Vec<Country>>;
    fn get_country_by_name(&self, name: &str) -> Result<Country>;
    async fn delete_country(&self, name: &str) -> Result<bool>;
    fn get_status(&self) -> Result<RefreshStatus>;
    async fn upsert_country(&self, data: crate::countries::CountryUpsert) -> Result<Country>;
}
