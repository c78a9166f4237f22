//! Provider trait definitions.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{ExchangeRateTable, RawCountry};

/// Source of the full country list.
#[async_trait]
pub trait CountryDirectoryProvider: Send + Sync {
    /// Constant identifier used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Fetches every country. Fails if the upstream status is not a success
    /// or the body is not a JSON array. Array elements that do not have the
    /// expected shape come back as empty `RawCountry` values so callers can
    /// account for them.
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError>;
}

/// Source of currency exchange rates relative to USD.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    fn id(&self) -> &'static str;

    async fn fetch_usd_rates(&self) -> Result<ExchangeRateTable, SourceError>;
}
