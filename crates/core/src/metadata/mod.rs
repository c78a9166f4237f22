//! Generic key/value metadata.

mod metadata_traits;

pub use metadata_traits::MetadataRepositoryTrait;
