use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::notifications;

pub const KIND_NEW_ORDER: &str = "New Order";
pub const KIND_NEW_REVIEW: &str = "New Review";
pub const KIND_ENROLLMENT_COMPLETED: &str = "Course Enrollment Completed";

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub order_item_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub kind: String,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotification {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub order_item_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub kind: String,
}

impl NewNotification {
    fn blank(kind: &str) -> Self {
        NewNotification {
            id: Uuid::new_v4(),
            user_id: None,
            teacher_id: None,
            order_id: None,
            order_item_id: None,
            review_id: None,
            kind: kind.to_string(),
        }
    }

    pub fn new_review(teacher_id: Uuid, review_id: Uuid) -> Self {
        NewNotification {
            teacher_id: Some(teacher_id),
            review_id: Some(review_id),
            ..Self::blank(KIND_NEW_REVIEW)
        }
    }

    pub fn new_order(teacher_id: Uuid, order_id: Uuid, order_item_id: Uuid) -> Self {
        NewNotification {
            teacher_id: Some(teacher_id),
            order_id: Some(order_id),
            order_item_id: Some(order_item_id),
            ..Self::blank(KIND_NEW_ORDER)
        }
    }

    pub fn enrollment_completed(user_id: Option<Uuid>, order_id: Uuid, order_item_id: Uuid) -> Self {
        NewNotification {
            user_id,
            order_id: Some(order_id),
            order_item_id: Some(order_item_id),
            ..Self::blank(KIND_ENROLLMENT_COMPLETED)
        }
    }
}
