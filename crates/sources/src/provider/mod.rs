//! Upstream provider implementations.

mod open_er_api;
mod rest_countries;
mod traits;

pub use open_er_api::{OpenErApiProvider, DEFAULT_EXCHANGE_RATES_URL};
pub use rest_countries::{RestCountriesProvider, DEFAULT_COUNTRIES_URL};
pub use traits::{CountryDirectoryProvider, ExchangeRateProvider};

use reqwest::{Client, Response};
use std::time::Duration;

use crate::errors::SourceError;

/// Default per-request upstream timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("country-currency/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Issues a GET and rejects non-success statuses.
async fn get_checked(client: &Client, provider: &str, url: &str) -> Result<Response, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UpstreamStatus {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}
