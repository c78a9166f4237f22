//! open.er-api.com exchange-rate provider (USD base).

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{build_client, get_checked, ExchangeRateProvider};
use crate::errors::SourceError;
use crate::models::ExchangeRateTable;

const PROVIDER_ID: &str = "OPEN_ER_API";

pub const DEFAULT_EXCHANGE_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

pub struct OpenErApiProvider {
    client: Client,
    url: String,
}

impl OpenErApiProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for OpenErApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_usd_rates(&self) -> Result<ExchangeRateTable, SourceError> {
        let response = get_checked(&self.client, PROVIDER_ID, &self.url).await?;

        let table: ExchangeRateTable = response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest(PROVIDER_ID, e))?;

        if let Some(base) = table.base_code.as_deref() {
            if !base.eq_ignore_ascii_case("USD") {
                log::warn!("{}: rate table base is {} rather than USD", PROVIDER_ID, base);
            }
        }
        log::info!("{}: fetched {} exchange rates", PROVIDER_ID, table.rates.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_rates_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v6/latest/USD");
                then.status(200).json_body(json!({
                    "result": "success",
                    "base_code": "USD",
                    "rates": {"USD": 1, "TST": 2.0, "EUR": 0.92}
                }));
            })
            .await;

        let provider =
            OpenErApiProvider::new(server.url("/v6/latest/USD"), Duration::from_secs(5));
        let table = provider.fetch_usd_rates().await.unwrap();
        assert_eq!(table.rate("TST"), Some(2.0));
        assert_eq!(table.rate("EUR"), Some(0.92));
    }

    #[tokio::test]
    async fn test_server_error_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v6/latest/USD");
                then.status(500);
            })
            .await;

        let provider =
            OpenErApiProvider::new(server.url("/v6/latest/USD"), Duration::from_secs(5));
        let err = provider.fetch_usd_rates().await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::UpstreamStatus { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v6/latest/USD");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({"rates": {}}));
            })
            .await;

        let provider =
            OpenErApiProvider::new(server.url("/v6/latest/USD"), Duration::from_millis(50));
        let err = provider.fetch_usd_rates().await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }));
    }
}
