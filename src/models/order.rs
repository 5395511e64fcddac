use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::{order_items, orders};

/// Payment lifecycle of an order. `Processing` is the only non-terminal
/// state; once `Paid` or `Failed` an order never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    Processing,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Processing => "Processing",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Failed)
    }

    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        self == PaymentStatus::Processing && next.is_terminal()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(PaymentStatus::Processing),
            "Paid" => Ok(PaymentStatus::Paid),
            "Failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub sub_total: BigDecimal,
    pub tax_fee: BigDecimal,
    pub total: BigDecimal,
    pub initial_total: BigDecimal,
    pub saved: BigDecimal,
    pub payment_status: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub sub_total: BigDecimal,
    pub tax_fee: BigDecimal,
    pub total: BigDecimal,
    pub initial_total: BigDecimal,
    pub saved: BigDecimal,
    pub payment_status: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(Order))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub price: BigDecimal,
    pub tax_fee: BigDecimal,
    pub total: BigDecimal,
    pub initial_total: BigDecimal,
    pub saved: BigDecimal,
    pub coupon_id: Option<Uuid>,
    pub applied_coupon: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub price: BigDecimal,
    pub tax_fee: BigDecimal,
    pub total: BigDecimal,
    pub initial_total: BigDecimal,
    pub saved: BigDecimal,
}

#[cfg(test)]
mod tests {
    use super::PaymentStatus;

    #[test]
    fn processing_can_settle_either_way() {
        assert!(PaymentStatus::Processing.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Processing.can_transition_to(PaymentStatus::Failed));
    }

    #[test]
    fn paid_and_failed_are_terminal() {
        for terminal in [PaymentStatus::Paid, PaymentStatus::Failed] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(PaymentStatus::Paid));
            assert!(!terminal.can_transition_to(PaymentStatus::Failed));
            assert!(!terminal.can_transition_to(PaymentStatus::Processing));
        }
    }

    #[test]
    fn processing_cannot_loop_back_to_itself() {
        assert!(!PaymentStatus::Processing.can_transition_to(PaymentStatus::Processing));
    }

    #[test]
    fn round_trips_through_strings() {
        for status in [
            PaymentStatus::Processing,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }
        assert!("Pending".parse::<PaymentStatus>().is_err());
    }
}
