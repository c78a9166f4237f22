use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{bail, Context};
use country_currency_core::constants::DEFAULT_CHART_PATH;
use country_currency_sources::{DEFAULT_COUNTRIES_URL, DEFAULT_EXCHANGE_RATES_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub chart_path: PathBuf,
    pub countries_url: String,
    pub exchange_rates_url: String,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
    /// `None` disables the background refresh.
    pub refresh_interval: Option<Duration>,
    pub cors_allow: Vec<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing keys take defaults;
    /// present but unparsable values are an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = get("CC_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid CC_LISTEN_ADDR")?;
        let db_path = get("DATABASE_URL", "./db/countries.db");
        let chart_path = PathBuf::from(get("CC_CHART_PATH", DEFAULT_CHART_PATH));
        let countries_url = get("CC_COUNTRIES_URL", DEFAULT_COUNTRIES_URL);
        let exchange_rates_url = get("CC_EXCHANGE_RATES_URL", DEFAULT_EXCHANGE_RATES_URL);

        let upstream_ms: u64 = get("CC_UPSTREAM_TIMEOUT_MS", "10000")
            .parse()
            .context("Invalid CC_UPSTREAM_TIMEOUT_MS")?;
        let request_ms: u64 = get("CC_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid CC_REQUEST_TIMEOUT_MS")?;
        let refresh_secs: u64 = get("CC_REFRESH_INTERVAL_SECS", "0")
            .parse()
            .context("Invalid CC_REFRESH_INTERVAL_SECS")?;
        if upstream_ms == 0 || request_ms == 0 {
            bail!("Timeouts must be greater than zero");
        }

        let cors_allow = get("CC_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match get("CC_LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => bail!("Invalid CC_LOG_FORMAT '{}', expected text or json", other),
        };

        Ok(Self {
            listen_addr,
            db_path,
            chart_path,
            countries_url,
            exchange_rates_url,
            upstream_timeout: Duration::from_millis(upstream_ms),
            request_timeout: Duration::from_millis(request_ms),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            cors_allow,
            log_format,
        })
    }
}
