use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::enrollments;

/// A student's access to a course, created when the backing order is paid.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Enrollment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub order_item_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = enrollments)]
pub struct NewEnrollment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub order_item_id: Uuid,
}
