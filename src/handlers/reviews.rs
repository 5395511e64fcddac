use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::course::Course;
use crate::models::notification::NewNotification;
use crate::models::review::NewReview;
use crate::schema::{courses, notifications, reviews};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub course_id: Uuid,
    pub user_id: Option<Uuid>,
    /// 1 to 5 stars.
    pub rating: i32,
    pub review: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReviewResponse {
    pub id: Uuid,
    /// Always false on creation; reviews only count toward the course rating
    /// once moderation activates them.
    pub active: bool,
}

/// POST /reviews
///
/// Stores the review inactive and notifies the course's teacher. The review
/// joins the rating aggregate only after moderation flips `active`.
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review recorded", body = CreateReviewResponse),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "reviews"
)]
pub async fn create_review(
    pool: web::Data<DbPool>,
    body: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    if !(1..=5).contains(&body.rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let review_id = web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            let course = courses::table
                .filter(courses::id.eq(body.course_id))
                .select(Course::as_select())
                .first(conn)
                .optional()?
                .ok_or(AppError::NotFound)?;

            let review_id = Uuid::new_v4();
            diesel::insert_into(reviews::table)
                .values(&NewReview {
                    id: review_id,
                    course_id: course.id,
                    user_id: body.user_id,
                    review: body.review.clone(),
                    rating: body.rating,
                    active: false,
                })
                .execute(conn)?;

            diesel::insert_into(notifications::table)
                .values(&NewNotification::new_review(course.teacher_id, review_id))
                .execute(conn)?;

            Ok(review_id)
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreateReviewResponse {
        id: review_id,
        active: false,
    }))
}
