use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::courses;

pub const STATUS_PUBLISHED: &str = "Published";

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Course {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub teacher_id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub language: String,
    pub level: String,
    pub platform_status: String,
    pub teacher_course_status: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// A course is visible in the catalog only when both the platform and the
    /// teacher have it published.
    pub fn is_published(&self) -> bool {
        self.platform_status == STATUS_PUBLISHED && self.teacher_course_status == STATUS_PUBLISHED
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = courses)]
pub struct NewCourse {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub teacher_id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub language: String,
    pub level: String,
    pub platform_status: String,
    pub teacher_course_status: String,
    pub featured: bool,
}
