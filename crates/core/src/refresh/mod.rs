//! Refresh module - pulls upstream data and replaces the stored countries.

mod gdp;
mod refresh_model;
mod refresh_service;


pub use gdp::{estimate_gdp, random_multiplier};
pub use refresh_model::RefreshOutcome;
pub use refresh_service::{RefreshService, RefreshServiceTrait};
