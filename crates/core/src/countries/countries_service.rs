use super::countries_model::{Country, CountryFilter, CountryUpsert, RefreshStatus};
use super::countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
use crate::constants::LAST_REFRESHED_AT_KEY;
use crate::errors::{Error, Result};
use crate::metadata::MetadataRepositoryTrait;
use crate::utils::time_utils::parse_stored_timestamp;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;

/// Read, delete and upsert operations over stored countries.
pub struct CountryService {
    repository: Arc<dyn CountryRepositoryTrait>,
    metadata: Arc<dyn MetadataRepositoryTrait>,
}

impl CountryService {
    pub fn new(
        repository: Arc<dyn CountryRepositoryTrait>,
        metadata: Arc<dyn MetadataRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            metadata,
        }
    }
}

#[async_trait]
impl CountryServiceTrait for CountryService {
    fn list_countries(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        self.repository.list_countries(filter)
    }

    fn get_country_by_name(&self, name: &str) -> Result<Country> {
        self.repository
            .find_by_name(name)?
            .ok_or_else(|| Error::NotFound(format!("Country '{}'", name)))
    }

    async fn delete_country(&self, name: &str) -> Result<bool> {
        let removed = self.repository.delete_by_name(name).await?;
        debug!("Deleted {} row(s) for country '{}'", removed, name);
        Ok(removed > 0)
    }

    fn get_status(&self) -> Result<RefreshStatus> {
        let total_countries = self.repository.count_countries()?;
        let last_refreshed_at = match self.metadata.get_value(LAST_REFRESHED_AT_KEY)? {
            Some(raw) => {
                let parsed = parse_stored_timestamp(&raw);
                if parsed.is_none() {
                    warn!("Ignoring malformed {} value: {:?}", LAST_REFRESHED_AT_KEY, raw);
                }
                parsed
            }
            None => None,
        };
        Ok(RefreshStatus {
            total_countries,
            last_refreshed_at,
        })
    }

    async fn upsert_country(&self, data: CountryUpsert) -> Result<Country> {
        let validated = data.validate()?;
        self.repository
            .upsert_country(validated, Utc::now().naive_utc())
            .await
    }
}
