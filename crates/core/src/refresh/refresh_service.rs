use async_trait::async_trait;
use chrono::{NaiveDateTime, SubsecRound, Utc};
use country_currency_sources::{
    CountryDirectoryProvider, ExchangeRateProvider, ExchangeRateTable, RawCountry,
};
use futures::future::try_join;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

use super::gdp::{estimate_gdp, random_multiplier};
use super::refresh_model::RefreshOutcome;
use crate::constants::BASE_CURRENCY;
use crate::countries::{CountryRepositoryTrait, NewCountry};
use crate::errors::Result;

#[async_trait]
pub trait RefreshServiceTrait: Send + Sync {
    /// Fetches both upstream sources and replaces every stored country.
    /// Any failure leaves the store untouched.
    async fn refresh(&self) -> Result<RefreshOutcome>;
}

pub struct RefreshService {
    countries_provider: Arc<dyn CountryDirectoryProvider>,
    rates_provider: Arc<dyn ExchangeRateProvider>,
    repository: Arc<dyn CountryRepositoryTrait>,
}

/// Records built from one upstream snapshot, before they hit the store.
#[derive(Debug, Default)]
pub(crate) struct ReconciledBatch {
    pub countries: Vec<NewCountry>,
    pub skipped: usize,
    pub missing_rates: usize,
}

impl RefreshService {
    pub fn new(
        countries_provider: Arc<dyn CountryDirectoryProvider>,
        rates_provider: Arc<dyn ExchangeRateProvider>,
        repository: Arc<dyn CountryRepositoryTrait>,
    ) -> Self {
        Self {
            countries_provider,
            rates_provider,
            repository,
        }
    }

    /// Turns raw entries into insertable rows. Entries without a name or
    /// country code are skipped, as are later duplicates of a name.
    pub(crate) fn reconcile(
        raw: Vec<RawCountry>,
        rates: &ExchangeRateTable,
        refreshed_at: NaiveDateTime,
    ) -> ReconciledBatch {
        let mut batch = ReconciledBatch::default();
        let mut seen = HashSet::new();

        for entry in raw {
            let (Some(name), Some(_code)) = (entry.common_name(), entry.country_code()) else {
                batch.skipped += 1;
                continue;
            };
            let population = entry.population.unwrap_or(0);
            if population < 0 {
                debug!("Skipping '{}' with negative population {}", name, population);
                batch.skipped += 1;
                continue;
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                warn!("Duplicate country name '{}' in upstream payload, keeping the first", name);
                batch.skipped += 1;
                continue;
            }

            let currency_code = entry.first_currency().map(str::to_string);
            let exchange_rate = match currency_code.as_deref() {
                Some(code) => match rates.rate(code) {
                    Some(rate) => Some(rate),
                    None if code == BASE_CURRENCY => Some(1.0),
                    None => {
                        debug!("No exchange rate for {} ({})", code, name);
                        batch.missing_rates += 1;
                        None
                    }
                },
                None => None,
            };
            let estimated_gdp = estimate_gdp(population, exchange_rate, random_multiplier());

            batch.countries.push(NewCountry {
                name: name.to_string(),
                capital: entry.first_capital().map(str::to_string),
                region: entry.region.clone().filter(|r| !r.trim().is_empty()),
                population,
                currency_code,
                exchange_rate,
                estimated_gdp,
                flag_url: entry.flag_png().map(str::to_string),
                last_refreshed_at: refreshed_at,
            });
        }

        batch
    }
}

#[async_trait]
impl RefreshServiceTrait for RefreshService {
    async fn refresh(&self) -> Result<RefreshOutcome> {
        debug!(
            "Refreshing countries from {} and {}",
            self.countries_provider.id(),
            self.rates_provider.id()
        );
        let (raw, rates) = try_join(
            self.countries_provider.fetch_countries(),
            self.rates_provider.fetch_usd_rates(),
        )
        .await?;

        let refreshed_at = Utc::now().naive_utc().trunc_subsecs(6);
        let fetched = raw.len();
        let batch = Self::reconcile(raw, &rates, refreshed_at);
        if batch.missing_rates > 0 {
            warn!("{} countries have no exchange rate", batch.missing_rates);
        }

        let inserted = self
            .repository
            .replace_all(batch.countries, refreshed_at)
            .await?;

        info!(
            "Refreshed {} countries ({} fetched, {} skipped)",
            inserted, fetched, batch.skipped
        );

        Ok(RefreshOutcome {
            inserted,
            skipped: batch.skipped,
            missing_rates: batch.missing_rates,
            refreshed_at,
        })
    }
}
