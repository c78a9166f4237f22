use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use log::debug;
use std::sync::Arc;

use super::model::{CountryDB, NewCountryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::metadata::MetadataEntryDB;
use crate::schema::{countries, metadata};
use country_currency_core::constants::LAST_REFRESHED_AT_KEY;
use country_currency_core::countries::{
    Country, CountryFilter, CountryRepositoryTrait, CountrySort, NewCountry,
    ValidatedCountryUpsert,
};
use country_currency_core::errors::Result;
use country_currency_core::utils::time_utils::format_stored_timestamp;

// SQLite's lower() only folds ASCII, so bound values use to_ascii_lowercase.
diesel::define_sql_function!(fn lower(x: Text) -> Text);

diesel::define_sql_function! {
    #[sql_name = "lower"]
    fn lower_nullable(x: Nullable<Text>) -> Nullable<Text>;
}

pub struct CountryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CountryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CountryRepository { pool, writer }
    }
}

fn find_by_name_in(conn: &mut SqliteConnection, name: &str) -> QueryResult<Option<CountryDB>> {
    countries::table
        .filter(lower(countries::name).eq(name.to_ascii_lowercase()))
        .select(CountryDB::as_select())
        .first(conn)
        .optional()
}

#[async_trait]
impl CountryRepositoryTrait for CountryRepository {
    fn list_countries(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = countries::table
            .select(CountryDB::as_select())
            .into_boxed();

        if let Some(region) = &filter.region {
            query = query.filter(lower_nullable(countries::region).eq(region.to_ascii_lowercase()));
        }
        if let Some(currency) = &filter.currency {
            query = query.filter(
                lower_nullable(countries::currency_code).eq(currency.to_ascii_lowercase()),
            );
        }
        // Rows without an estimate go last either way.
        query = match filter.sort {
            Some(CountrySort::GdpDesc) => query.order_by((
                countries::estimated_gdp.is_null().asc(),
                countries::estimated_gdp.desc(),
            )),
            Some(CountrySort::GdpAsc) => query.order_by((
                countries::estimated_gdp.is_null().asc(),
                countries::estimated_gdp.asc(),
            )),
            None => query,
        };

        let rows = query
            .load::<CountryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Country::from).collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Country>> {
        let mut conn = get_connection(&self.pool)?;
        let row = find_by_name_in(&mut conn, name).map_err(StorageError::from)?;
        Ok(row.map(Country::from))
    }

    fn count_countries(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = countries::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total)
    }

    async fn delete_by_name(&self, name: &str) -> Result<usize> {
        let key = name.to_ascii_lowercase();
        self.writer
            .exec(move |conn| {
                let removed =
                    diesel::delete(countries::table.filter(lower(countries::name).eq(key)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                Ok(removed)
            })
            .await
    }

    async fn upsert_country(
        &self,
        upsert: ValidatedCountryUpsert,
        now: NaiveDateTime,
    ) -> Result<Country> {
        self.writer
            .exec(move |conn| {
                if let Some(existing) =
                    find_by_name_in(conn, upsert.name()).map_err(StorageError::from)?
                {
                    let mut country = Country::from(existing);
                    upsert.apply_to(&mut country, now);
                    let row = CountryDB::from(country);
                    diesel::update(countries::table.find(row.id))
                        .set(&row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    debug!("Updated country '{}'", row.name);
                    return Ok(Country::from(row));
                }

                let new_row = NewCountryDB::from(upsert.into_new_country(now));
                let inserted = diesel::insert_into(countries::table)
                    .values(&new_row)
                    .returning(CountryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted country '{}'", inserted.name);
                Ok(Country::from(inserted))
            })
            .await
    }

    async fn replace_all(
        &self,
        new_countries: Vec<NewCountry>,
        refreshed_at: NaiveDateTime,
    ) -> Result<usize> {
        let rows: Vec<NewCountryDB> = new_countries.into_iter().map(NewCountryDB::from).collect();
        let stamp = MetadataEntryDB {
            key: LAST_REFRESHED_AT_KEY.to_string(),
            value: format_stored_timestamp(refreshed_at),
        };

        self.writer
            .exec(move |conn| {
                let removed = diesel::delete(countries::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let inserted = if rows.is_empty() {
                    0
                } else {
                    diesel::insert_into(countries::table)
                        .values(&rows)
                        .execute(conn)
                        .map_err(StorageError::from)?
                };
                diesel::replace_into(metadata::table)
                    .values(&stamp)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                debug!("Replaced {} countries with {}", removed, inserted);
                Ok(inserted)
            })
            .await
    }
}
