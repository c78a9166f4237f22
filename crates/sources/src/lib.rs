//! Country Currency Sources
//!
//! Fetches reference data from the two upstream services the refresh cycle
//! depends on:
//!
//! ```text
//! +----------------------+        +------------------------+
//! | CountryDirectory     |        | ExchangeRateProvider   |
//! | (restcountries v3.1) |        | (open.er-api, base USD)|
//! +----------------------+        +------------------------+
//!            |                                |
//!            v                                v
//!     Vec<RawCountry>                 ExchangeRateTable
//! ```
//!
//! Providers only fetch and decode. Transforming the payload into stored
//! records happens in `country-currency-core`.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::SourceError;
pub use models::{CountryName, ExchangeRateTable, FlagImages, RawCountry};
pub use provider::{
    CountryDirectoryProvider, ExchangeRateProvider, OpenErApiProvider, RestCountriesProvider,
    DEFAULT_COUNTRIES_URL, DEFAULT_EXCHANGE_RATES_URL, DEFAULT_REQUEST_TIMEOUT,
};
