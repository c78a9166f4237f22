use diesel::prelude::*;

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::metadata)]
pub struct MetadataEntryDB {
    pub key: String,
    pub value: String,
}
