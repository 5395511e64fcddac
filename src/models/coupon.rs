use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::coupons;

/// Percent discount issued by a teacher, redeemed against the teacher's items
/// of a pending order.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = coupons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Coupon {
    pub id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub code: String,
    pub discount: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = coupons)]
pub struct NewCoupon {
    pub id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub code: String,
    pub discount: i32,
    pub active: bool,
}
