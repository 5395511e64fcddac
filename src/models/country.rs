use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::countries;

/// Read-only reference row used for tax resolution. `tax_rate` is an integer
/// percent; lookups go through the normalized (lowercased) name.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = countries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub tax_rate: i32,
    pub active: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = countries)]
pub struct NewCountry {
    pub id: Uuid,
    pub name: String,
    pub tax_rate: i32,
    pub active: bool,
}
