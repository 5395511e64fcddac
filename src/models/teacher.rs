use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::teachers;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = teachers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Teacher {
    pub id: Uuid,
    pub full_name: String,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = teachers)]
pub struct NewTeacher {
    pub id: Uuid,
    pub full_name: String,
    pub country: Option<String>,
}
