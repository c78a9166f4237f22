use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use super::chart_errors::ChartError;
use super::chart_render::{render_png, summarize};
use crate::constants::LAST_REFRESHED_AT_KEY;
use crate::countries::{CountryFilter, CountryRepositoryTrait};
use crate::errors::Result;
use crate::metadata::MetadataRepositoryTrait;
use crate::utils::time_utils::parse_stored_timestamp;

pub trait ChartServiceTrait: Send + Sync {
    /// Renders the current data and overwrites the image file.
    fn generate(&self) -> Result<PathBuf>;
}

pub struct ChartService {
    repository: Arc<dyn CountryRepositoryTrait>,
    metadata: Arc<dyn MetadataRepositoryTrait>,
    output_path: PathBuf,
}

impl ChartService {
    pub fn new(
        repository: Arc<dyn CountryRepositoryTrait>,
        metadata: Arc<dyn MetadataRepositoryTrait>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            metadata,
            output_path: output_path.into(),
        }
    }
}

impl ChartServiceTrait for ChartService {
    fn generate(&self) -> Result<PathBuf> {
        let countries = self.repository.list_countries(&CountryFilter::default())?;
        let last_refreshed_at = self
            .metadata
            .get_value(LAST_REFRESHED_AT_KEY)?
            .and_then(|raw| parse_stored_timestamp(&raw));

        let summary = summarize(&countries, last_refreshed_at)?;
        let bytes = render_png(&summary)?;
        write_atomically(&self.output_path, &bytes)?;

        info!(
            "Chart written to {} ({} regions, {} bytes)",
            self.output_path.display(),
            summary.regions.len(),
            bytes.len()
        );
        Ok(self.output_path.clone())
    }
}

/// Writes next to the target, then renames over it.
fn write_atomically(path: &Path, bytes: &[u8]) -> std::result::Result<(), ChartError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    debug!("Writing chart to temporary file {}", tmp.display());
    if let Err(err) = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}
