//! restcountries.com country directory provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;

use super::{build_client, get_checked, CountryDirectoryProvider};
use crate::errors::SourceError;
use crate::models::RawCountry;

const PROVIDER_ID: &str = "RESTCOUNTRIES";

pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,cca2,capital,region,population,currencies,flags";

pub struct RestCountriesProvider {
    client: Client,
    url: String,
}

impl RestCountriesProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CountryDirectoryProvider for RestCountriesProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError> {
        let response = get_checked(&self.client, PROVIDER_ID, &self.url).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest(PROVIDER_ID, e))?;

        let entries = match body {
            Value::Array(entries) => entries,
            other => {
                return Err(SourceError::UnexpectedFormat {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("expected an array, got {}", json_kind(&other)),
                })
            }
        };

        let countries: Vec<RawCountry> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let (country, rejected) = decode_entry(entry);
                if !rejected.is_empty() {
                    log::warn!(
                        "{}: entry {} ({}) has unusable fields: {}",
                        PROVIDER_ID,
                        index,
                        country.common_name().unwrap_or("unnamed"),
                        rejected.join(", ")
                    );
                }
                country
            })
            .collect();

        log::info!("{}: fetched {} country entries", PROVIDER_ID, countries.len());
        Ok(countries)
    }
}

/// Decodes one directory entry field by field, so a single field of the
/// wrong type does not cost the whole record. A bare string `capital` is
/// read as a one-element list. Returns the names of the fields dropped.
fn decode_entry(entry: Value) -> (RawCountry, Vec<&'static str>) {
    let mut fields = match entry {
        Value::Object(fields) => fields,
        _ => return (RawCountry::default(), vec!["entry"]),
    };
    let mut rejected = Vec::new();

    let capital = match fields.remove("capital") {
        Some(Value::String(capital)) => Some(vec![capital]),
        Some(other) => typed(other, "capital", &mut rejected).flatten(),
        None => None,
    };
    let currencies = match fields.remove("currencies") {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            rejected.push("currencies");
            Vec::new()
        }
    };

    let country = RawCountry {
        name: take(&mut fields, "name", &mut rejected),
        cca2: take(&mut fields, "cca2", &mut rejected),
        capital,
        region: take(&mut fields, "region", &mut rejected),
        population: take(&mut fields, "population", &mut rejected),
        currencies,
        flags: take(&mut fields, "flags", &mut rejected),
    };
    (country, rejected)
}

fn take<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Option<T> {
    fields
        .remove(key)
        .and_then(|value| typed::<Option<T>>(value, key, rejected))
        .flatten()
}

fn typed<T: DeserializeOwned>(
    value: Value,
    key: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            rejected.push(key);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    fn provider_for(server: &MockServer) -> RestCountriesProvider {
        RestCountriesProvider::new(server.url("/v3.1/all"), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_fetch_countries_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v3.1/all");
                then.status(200).json_body(json!([
                    {
                        "name": {"common": "Testland"},
                        "cca2": "TL",
                        "capital": ["Test City"],
                        "region": "Testia",
                        "population": 1000000,
                        "currencies": {"TST": {}},
                        "flags": {"png": "url"}
                    },
                    {"name": {"common": "Nowhere"}}
                ]));
            })
            .await;

        let countries = provider_for(&server).fetch_countries().await.unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].common_name(), Some("Testland"));
        assert_eq!(countries[1].country_code(), None);
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v3.1/all");
                then.status(502);
            })
            .await;

        let err = provider_for(&server).fetch_countries().await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::UpstreamStatus { status: 502, .. }
        ));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_object_payload_is_format_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v3.1/all");
                then.status(200).json_body(json!({"status": 404, "message": "Not Found"}));
            })
            .await;

        let err = provider_for(&server).fetch_countries().await.unwrap_err();
        assert!(matches!(err, SourceError::UnexpectedFormat { .. }));
        assert!(!err.is_unavailable());
    }

    #[tokio::test]
    async fn test_non_object_entries_become_empty_records() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v3.1/all");
                then.status(200).json_body(json!([42, "x", {"cca2": "AA"}]));
            })
            .await;

        let countries = provider_for(&server).fetch_countries().await.unwrap();
        assert_eq!(countries.len(), 3);
        assert_eq!(countries[0], RawCountry::default());
        assert_eq!(countries[1], RawCountry::default());
        assert_eq!(countries[2].country_code(), Some("AA"));
    }

    #[tokio::test]
    async fn test_mistyped_fields_drop_alone() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v3.1/all");
                then.status(200).json_body(json!([
                    {
                        "name": {"common": "Stringcap"},
                        "cca2": "SC",
                        "capital": "Solo City",
                        "region": "Testia",
                        "population": "many",
                        "currencies": {"XTS": {}, "EUR": {}},
                        "flags": {"png": "url"}
                    },
                    {
                        "name": {"common": "Listless"},
                        "cca2": "LL",
                        "capital": 7,
                        "currencies": ["EUR"]
                    }
                ]));
            })
            .await;

        let countries = provider_for(&server).fetch_countries().await.unwrap();
        assert_eq!(countries.len(), 2);

        let stringcap = &countries[0];
        assert_eq!(stringcap.common_name(), Some("Stringcap"));
        assert_eq!(stringcap.country_code(), Some("SC"));
        assert_eq!(stringcap.first_capital(), Some("Solo City"));
        assert_eq!(stringcap.population, None);
        assert_eq!(stringcap.currencies, vec!["XTS", "EUR"]);
        assert_eq!(stringcap.flag_png(), Some("url"));

        let listless = &countries[1];
        assert_eq!(listless.common_name(), Some("Listless"));
        assert_eq!(listless.first_capital(), None);
        assert!(listless.currencies.is_empty());
    }
}
