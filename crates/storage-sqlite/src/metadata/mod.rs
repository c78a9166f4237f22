//! SQLite storage implementation for key/value metadata.

mod model;
mod repository;

pub use model::MetadataEntryDB;
pub use repository::MetadataRepository;

pub use country_currency_core::metadata::MetadataRepositoryTrait;
