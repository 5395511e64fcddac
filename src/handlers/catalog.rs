use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::category::Category;
use crate::models::course::{Course, STATUS_PUBLISHED};
use crate::models::review::Review;
use crate::pricing;
use crate::schema::{categories, courses, reviews};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub teacher_id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: String,
    pub language: String,
    pub level: String,
    pub featured: bool,
    pub average_rating: Option<f64>,
    pub rating_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRatingResponse {
    /// Arithmetic mean of active review ratings; null when nobody has rated
    /// the course yet.
    pub average: Option<f64>,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub rating: i32,
    pub review: String,
    pub reply: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListCoursesParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListCoursesResponse {
    pub items: Vec<CourseResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Active review ratings for one course; the mean is computed on read, never
/// stored.
fn course_ratings(conn: &mut PgConnection, course_id: Uuid) -> Result<Vec<i32>, AppError> {
    let ratings = reviews::table
        .filter(reviews::course_id.eq(course_id))
        .filter(reviews::active.eq(true))
        .select(reviews::rating)
        .load::<i32>(conn)?;
    Ok(ratings)
}

fn course_response(conn: &mut PgConnection, course: Course) -> Result<CourseResponse, AppError> {
    let ratings = course_ratings(conn, course.id)?;
    Ok(CourseResponse {
        id: course.id,
        category_id: course.category_id,
        teacher_id: course.teacher_id,
        title: course.title,
        slug: course.slug,
        description: course.description,
        price: course.price.to_string(),
        language: course.language,
        level: course.level,
        featured: course.featured,
        average_rating: pricing::average_rating(&ratings),
        rating_count: ratings.len() as i64,
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /courses/categories
#[utoipa::path(
    get,
    path = "/courses/categories",
    responses(
        (status = 200, description = "Active categories", body = [CategoryResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_categories(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;

        let rows = categories::table
            .filter(categories::active.eq(true))
            .order(categories::title.asc())
            .select(Category::as_select())
            .load(&mut conn)?;

        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<CategoryResponse> = rows
        .into_iter()
        .map(|c| CategoryResponse {
            id: c.id,
            title: c.title,
            slug: c.slug,
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /courses
///
/// Published courses, newest first. Use `page` (1-based) and `limit` to
/// control pagination.
#[utoipa::path(
    get,
    path = "/courses",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of published courses", body = ListCoursesResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_courses(
    pool: web::Data<DbPool>,
    query: web::Query<ListCoursesParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);
    let offset = (page - 1) * limit;

    let result = web::block(move || {
        let mut conn = pool.get()?;

        let total: i64 = courses::table
            .filter(courses::platform_status.eq(STATUS_PUBLISHED))
            .filter(courses::teacher_course_status.eq(STATUS_PUBLISHED))
            .count()
            .get_result(&mut conn)?;

        let rows = courses::table
            .filter(courses::platform_status.eq(STATUS_PUBLISHED))
            .filter(courses::teacher_course_status.eq(STATUS_PUBLISHED))
            .select(Course::as_select())
            .order(courses::created_at.desc())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)?;

        let items: Result<Vec<CourseResponse>, AppError> = rows
            .into_iter()
            .map(|course| course_response(&mut conn, course))
            .collect();

        Ok::<_, AppError>(ListCoursesResponse {
            items: items?,
            total,
            page,
            limit,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /courses/{slug}
#[utoipa::path(
    get,
    path = "/courses/{slug}",
    params(
        ("slug" = String, Path, description = "Course slug"),
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found or unpublished"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn course_detail(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();

    let result = web::block(move || {
        let mut conn = pool.get()?;

        let course = courses::table
            .filter(courses::slug.eq(&slug))
            .select(Course::as_select())
            .first(&mut conn)
            .optional()?
            .filter(Course::is_published);

        let Some(course) = course else {
            return Ok::<_, AppError>(None);
        };

        Ok(Some(course_response(&mut conn, course)?))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(course) => Ok(HttpResponse::Ok().json(course)),
        None => Err(AppError::NotFound),
    }
}

/// GET /courses/{id}/rating
///
/// The rating aggregate over active reviews. A course nobody has rated yet
/// answers `average: null`, distinct from any numeric rating.
#[utoipa::path(
    get,
    path = "/courses/{id}/rating",
    params(
        ("id" = Uuid, Path, description = "Course UUID"),
    ),
    responses(
        (status = 200, description = "Rating aggregate", body = CourseRatingResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn course_rating(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();

    let ratings = web::block(move || {
        let mut conn = pool.get()?;

        let exists: i64 = courses::table
            .filter(courses::id.eq(course_id))
            .count()
            .get_result(&mut conn)?;
        if exists == 0 {
            return Err(AppError::NotFound);
        }

        course_ratings(&mut conn, course_id)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CourseRatingResponse {
        average: pricing::average_rating(&ratings),
        count: ratings.len() as i64,
    }))
}

/// GET /courses/{slug}/reviews
#[utoipa::path(
    get,
    path = "/courses/{slug}/reviews",
    params(
        ("slug" = String, Path, description = "Course slug"),
    ),
    responses(
        (status = 200, description = "Active reviews for the course", body = [ReviewResponse]),
        (status = 404, description = "Course not found or unpublished"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn course_reviews(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();

    let rows = web::block(move || {
        let mut conn = pool.get()?;

        let course = courses::table
            .filter(courses::slug.eq(&slug))
            .select(Course::as_select())
            .first(&mut conn)
            .optional()?
            .filter(Course::is_published)
            .ok_or(AppError::NotFound)?;

        let rows = reviews::table
            .filter(reviews::course_id.eq(course.id))
            .filter(reviews::active.eq(true))
            .order(reviews::created_at.desc())
            .select(Review::as_select())
            .load(&mut conn)?;

        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ReviewResponse> = rows
        .into_iter()
        .map(|r| ReviewResponse {
            id: r.id,
            user_id: r.user_id,
            rating: r.rating,
            review: r.review,
            reply: r.reply,
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}
