use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::MetadataEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::metadata;
use country_currency_core::errors::Result;
use country_currency_core::metadata::MetadataRepositoryTrait;

pub struct MetadataRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MetadataRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MetadataRepository { pool, writer }
    }
}

#[async_trait]
impl MetadataRepositoryTrait for MetadataRepository {
    fn get_value(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = metadata::table
            .find(key)
            .select(metadata::value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let entry = MetadataEntryDB {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.writer
            .exec(move |conn| {
                diesel::replace_into(metadata::table)
                    .values(&entry)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
