use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::cart_lines;

/// One course entry within a shopping basket. `cart_id` is the client-supplied
/// session id shared by every line of the basket; `user_id` is absent for
/// anonymous carts.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartLine {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Option<Uuid>,
    pub price: BigDecimal,
    pub tax_fee: BigDecimal,
    pub total: BigDecimal,
    pub country: String,
    pub cart_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_lines)]
pub struct NewCartLine {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Option<Uuid>,
    pub price: BigDecimal,
    pub tax_fee: BigDecimal,
    pub total: BigDecimal,
    pub country: String,
    pub cart_id: String,
}
