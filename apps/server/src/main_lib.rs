use std::sync::Arc;

use crate::config::{Config, LogFormat};
use country_currency_core::{
    chart::{ChartService, ChartServiceTrait},
    countries::{CountryService, CountryServiceTrait},
    refresh::{RefreshService, RefreshServiceTrait},
};
use country_currency_sources::{OpenErApiProvider, RestCountriesProvider};
use country_currency_storage_sqlite::{
    countries::CountryRepository,
    db::{self, write_actor},
    metadata::MetadataRepository,
};
use tokio::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub country_service: Arc<dyn CountryServiceTrait>,
    pub refresh_service: Arc<dyn RefreshServiceTrait>,
    pub chart_service: Arc<dyn ChartServiceTrait>,
    /// Held for a whole refresh plus chart regeneration.
    pub refresh_lock: Mutex<()>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let country_repo = Arc::new(CountryRepository::new(pool.clone(), writer.clone()));
    let metadata_repo = Arc::new(MetadataRepository::new(pool.clone(), writer.clone()));

    let country_service = Arc::new(CountryService::new(
        country_repo.clone(),
        metadata_repo.clone(),
    ));
    let refresh_service = Arc::new(RefreshService::new(
        Arc::new(RestCountriesProvider::new(
            config.countries_url.clone(),
            config.upstream_timeout,
        )),
        Arc::new(OpenErApiProvider::new(
            config.exchange_rates_url.clone(),
            config.upstream_timeout,
        )),
        country_repo.clone(),
    ));
    let chart_service = Arc::new(ChartService::new(
        country_repo,
        metadata_repo,
        config.chart_path.clone(),
    ));

    Ok(Arc::new(AppState {
        country_service,
        refresh_service,
        chart_service,
        refresh_lock: Mutex::new(()),
    }))
}
