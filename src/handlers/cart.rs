use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::cart::{CartLine, NewCartLine};
use crate::models::country::Country;
use crate::models::course::Course;
use crate::pricing::{self, TaxPolicy};
use crate::schema::{cart_lines, countries, courses};

diesel::define_sql_function! {
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertCartLineRequest {
    pub course_id: Uuid,
    /// Absent for anonymous carts.
    pub user_id: Option<Uuid>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "19.99"
    pub price: String,
    pub country_name: String,
    /// Client-supplied basket session id, shared by all lines of one basket.
    pub cart_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Option<Uuid>,
    pub price: String,
    pub tax_fee: String,
    pub total: String,
    pub country: String,
    pub cart_id: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        CartLineResponse {
            id: line.id,
            course_id: line.course_id,
            user_id: line.user_id,
            price: line.price.to_string(),
            tax_fee: line.tax_fee.to_string(),
            total: line.total.to_string(),
            country: line.country,
            cart_id: line.cart_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartTotalsResponse {
    pub price: String,
    pub tax: String,
    pub total: String,
}

enum UpsertOutcome {
    Created(Uuid),
    Updated(Uuid),
}

/// Resolve the tax policy for a shopper-supplied country name.
///
/// The lookup goes through the normalized key (trimmed, case-folded) against
/// active countries only. Anything unresolvable falls back to the zero-rated
/// default label; an unknown country is policy, not an error.
fn resolve_tax_policy(
    conn: &mut PgConnection,
    country_name: &str,
) -> Result<TaxPolicy, AppError> {
    let found = countries::table
        .filter(lower(countries::name).eq(pricing::normalize_country(country_name)))
        .filter(countries::active.eq(true))
        .select(Country::as_select())
        .first(conn)
        .optional()?;

    Ok(found
        .map(|c| TaxPolicy::for_country(&c.name, c.tax_rate))
        .unwrap_or_else(TaxPolicy::fallback))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /cart
///
/// Finds-or-creates the cart line keyed by `(cart_id, course_id)`. An existing
/// line is overwritten in place (idempotent update, not additive), answering
/// 200; a new line answers 201. Tax is resolved from the country name and the
/// stored amounts always satisfy `total == price + tax_fee`.
#[utoipa::path(
    post,
    path = "/cart",
    request_body = UpsertCartLineRequest,
    responses(
        (status = 200, description = "Existing cart line updated"),
        (status = 201, description = "Cart line created"),
        (status = 400, description = "Invalid price or blank cart id"),
        (status = 404, description = "Course not found or unpublished"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn upsert_cart_line(
    pool: web::Data<DbPool>,
    body: web::Json<UpsertCartLineRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    if body.cart_id.trim().is_empty() {
        return Err(AppError::BadRequest("cart_id must not be blank".to_string()));
    }
    let price = BigDecimal::from_str(&body.price)
        .map_err(|e| AppError::BadRequest(format!("invalid price '{}': {}", body.price, e)))?;
    if price < BigDecimal::from(0) {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }

    let outcome = web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            let course = courses::table
                .filter(courses::id.eq(body.course_id))
                .select(Course::as_select())
                .first(conn)
                .optional()?
                .filter(Course::is_published)
                .ok_or(AppError::NotFound)?;

            let policy = resolve_tax_policy(conn, &body.country_name)?;
            let (tax_fee, total) = pricing::line_amounts(&price, &policy);

            let existing: Option<CartLine> = cart_lines::table
                .filter(cart_lines::cart_id.eq(&body.cart_id))
                .filter(cart_lines::course_id.eq(course.id))
                .select(CartLine::as_select())
                .first(conn)
                .optional()?;

            match existing {
                Some(line) => {
                    diesel::update(cart_lines::table.find(line.id))
                        .set((
                            cart_lines::user_id.eq(body.user_id),
                            cart_lines::price.eq(&price),
                            cart_lines::tax_fee.eq(&tax_fee),
                            cart_lines::total.eq(&total),
                            cart_lines::country.eq(&policy.country),
                        ))
                        .execute(conn)?;
                    Ok(UpsertOutcome::Updated(line.id))
                }
                None => {
                    let id = Uuid::new_v4();
                    diesel::insert_into(cart_lines::table)
                        .values(&NewCartLine {
                            id,
                            course_id: course.id,
                            user_id: body.user_id,
                            price: price.clone(),
                            tax_fee,
                            total,
                            country: policy.country.clone(),
                            cart_id: body.cart_id.clone(),
                        })
                        .execute(conn)?;
                    Ok(UpsertOutcome::Created(id))
                }
            }
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(match outcome {
        UpsertOutcome::Created(id) => {
            HttpResponse::Created().json(json!({ "id": id, "status": "created" }))
        }
        UpsertOutcome::Updated(id) => {
            HttpResponse::Ok().json(json!({ "id": id, "status": "updated" }))
        }
    })
}

/// GET /cart/{cart_id}
///
/// All lines of one basket session, possibly empty.
#[utoipa::path(
    get,
    path = "/cart/{cart_id}",
    params(
        ("cart_id" = String, Path, description = "Basket session id"),
    ),
    responses(
        (status = 200, description = "Cart lines", body = [CartLineResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn list_cart(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();

    let lines = web::block(move || {
        let mut conn = pool.get()?;

        let rows = cart_lines::table
            .filter(cart_lines::cart_id.eq(&cart_id))
            .order(cart_lines::created_at.asc())
            .select(CartLine::as_select())
            .load(&mut conn)?;

        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<CartLineResponse> = lines.into_iter().map(CartLineResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /cart/{cart_id}/{item_id}
#[utoipa::path(
    delete,
    path = "/cart/{cart_id}/{item_id}",
    params(
        ("cart_id" = String, Path, description = "Basket session id"),
        ("item_id" = Uuid, Path, description = "Cart line UUID"),
    ),
    responses(
        (status = 204, description = "Cart line removed"),
        (status = 404, description = "No such line in this cart"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn delete_cart_line(
    pool: web::Data<DbPool>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, item_id) = path.into_inner();

    let deleted = web::block(move || {
        let mut conn = pool.get()?;

        let n = diesel::delete(
            cart_lines::table
                .filter(cart_lines::cart_id.eq(&cart_id))
                .filter(cart_lines::id.eq(item_id)),
        )
        .execute(&mut conn)?;

        Ok::<_, AppError>(n)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    if deleted == 0 {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::NoContent().finish())
}

/// GET /cart/stats/{cart_id}
///
/// Sums price, tax and total independently across the session's lines.
/// An unknown or empty cart id answers zeros rather than 404.
#[utoipa::path(
    get,
    path = "/cart/stats/{cart_id}",
    params(
        ("cart_id" = String, Path, description = "Basket session id"),
    ),
    responses(
        (status = 200, description = "Aggregated cart totals", body = CartTotalsResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn cart_stats(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();

    let totals = web::block(move || {
        let mut conn = pool.get()?;

        let rows = cart_lines::table
            .filter(cart_lines::cart_id.eq(&cart_id))
            .select(CartLine::as_select())
            .load(&mut conn)?;

        Ok::<_, AppError>(pricing::cart_totals(&rows))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartTotalsResponse {
        price: totals.price.to_string(),
        tax: totals.tax.to_string(),
        total: totals.total.to_string(),
    }))
}
