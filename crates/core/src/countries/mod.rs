//! Countries module - domain models, services, and traits.

mod countries_model;
mod countries_service;
mod countries_traits;

#[cfg(test)]
mod countries_service_tests;

pub use countries_model::{
    gdp_allowed, Country, CountryFilter, CountrySort, CountryUpsert, NewCountry, RefreshStatus,
    ValidatedCountryUpsert,
};
pub use countries_service::CountryService;
pub use countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
