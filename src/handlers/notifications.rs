use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::notification::Notification;
use crate::schema::notifications;

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: String,
    pub order_id: Option<Uuid>,
    pub order_item_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub seen: bool,
    pub created_at: String,
}

/// GET /notifications/teacher/{teacher_id}
#[utoipa::path(
    get,
    path = "/notifications/teacher/{teacher_id}",
    params(
        ("teacher_id" = Uuid, Path, description = "Teacher UUID"),
    ),
    responses(
        (status = 200, description = "Teacher notifications, newest first", body = [NotificationResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "notifications"
)]
pub async fn teacher_notifications(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let teacher_id = path.into_inner();

    let rows = web::block(move || {
        let mut conn = pool.get()?;

        let rows = notifications::table
            .filter(notifications::teacher_id.eq(teacher_id))
            .order(notifications::created_at.desc())
            .select(Notification::as_select())
            .load(&mut conn)?;

        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<NotificationResponse> = rows
        .into_iter()
        .map(|n| NotificationResponse {
            id: n.id,
            kind: n.kind,
            order_id: n.order_id,
            order_item_id: n.order_item_id,
            review_id: n.review_id,
            seen: n.seen,
            created_at: n.created_at.to_rfc3339(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /notifications/{id}/seen
///
/// Idempotent: marking an already-seen notification succeeds again.
#[utoipa::path(
    put,
    path = "/notifications/{id}/seen",
    params(
        ("id" = Uuid, Path, description = "Notification UUID"),
    ),
    responses(
        (status = 200, description = "Notification marked seen"),
        (status = 404, description = "Notification not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "notifications"
)]
pub async fn mark_seen(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let updated = web::block(move || {
        let mut conn = pool.get()?;

        let n = diesel::update(notifications::table.find(id))
            .set(notifications::seen.eq(true))
            .execute(&mut conn)?;

        Ok::<_, AppError>(n)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    if updated == 0 {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::Ok().json(json!({ "id": id, "seen": true })))
}
