//! SQLite storage implementation for the country currency service.
//!
//! This crate is the only place where Diesel appears. It implements the
//! repository traits of `country-currency-core`:
//!
//! ```text
//!   core (traits)  <----  storage-sqlite (this crate)
//!                                 |
//!                 r2d2 pool (reads) + writer actor (writes)
//!                                 |
//!                                 v
//!                             SQLite DB (WAL)
//! ```
//!
//! Every write goes through one `WriteHandle`, so a refresh's delete and
//! re-insert land in a single immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;

pub mod countries;
pub mod metadata;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use errors::{IntoCore, StorageError};

pub use country_currency_core::errors::{DatabaseError, Error, Result};
