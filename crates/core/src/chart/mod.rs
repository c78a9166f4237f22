//! Chart module - GDP summary image generated from stored countries.

mod chart_errors;
mod chart_model;
mod chart_render;
mod chart_service;
mod glyphs;


pub use chart_errors::ChartError;
pub use chart_model::{GdpSummary, RegionTotal, TopCountry};
pub use chart_render::{render_png, summarize, TEXT_KEYS};
pub use chart_service::{ChartService, ChartServiceTrait};
