use crate::errors::Result;
use async_trait::async_trait;

/// Key/value store for singleton values such as the last refresh time.
#[async_trait]
pub trait MetadataRepositoryTrait: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or overwrites `key`.
    async fn set_value(&self, key: &str, value: &str) -> Result<()>;
}
