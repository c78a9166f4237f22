//! Country currency service core.
//!
//! Domain models, repository and service traits, the refresh cycle and the
//! summary chart. Nothing here depends on a concrete database or HTTP stack:
//! storage lives in `country-currency-storage-sqlite`, upstream fetching in
//! `country-currency-sources`.

pub mod chart;
pub mod constants;
pub mod countries;
pub mod errors;
pub mod metadata;
pub mod refresh;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
