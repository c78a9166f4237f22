//! Database models for countries.

use chrono::NaiveDateTime;
use country_currency_core::countries::{Country, NewCountry};
use diesel::prelude::*;

#[derive(Queryable, Identifiable, Selectable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CountryDB {
    pub id: i32,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewCountryDB {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: NaiveDateTime,
}

impl From<CountryDB> for Country {
    fn from(db: CountryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            capital: db.capital,
            region: db.region,
            population: db.population,
            currency_code: db.currency_code,
            exchange_rate: db.exchange_rate,
            estimated_gdp: db.estimated_gdp,
            flag_url: db.flag_url,
            last_refreshed_at: db.last_refreshed_at,
        }
    }
}

impl From<Country> for CountryDB {
    fn from(domain: Country) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            capital: domain.capital,
            region: domain.region,
            population: domain.population,
            currency_code: domain.currency_code,
            exchange_rate: domain.exchange_rate,
            estimated_gdp: domain.estimated_gdp,
            flag_url: domain.flag_url,
            last_refreshed_at: domain.last_refreshed_at,
        }
    }
}

impl From<NewCountry> for NewCountryDB {
    fn from(domain: NewCountry) -> Self {
        Self {
            name: domain.name,
            capital: domain.capital,
            region: domain.region,
            population: domain.population,
            currency_code: domain.currency_code,
            exchange_rate: domain.exchange_rate,
            estimated_gdp: domain.estimated_gdp,
            flag_url: domain.flag_url,
            last_refreshed_at: domain.last_refreshed_at,
        }
    }
}
