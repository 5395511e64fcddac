use actix_web::{web, HttpResponse};
use bigdecimal::{BigDecimal, Zero};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::cart::CartLine;
use crate::models::coupon::Coupon;
use crate::models::course::Course;
use crate::models::enrollment::NewEnrollment;
use crate::models::notification::NewNotification;
use crate::models::order::{NewOrder, NewOrderItem, Order, OrderItem, PaymentStatus};
use crate::pricing;
use crate::schema::{cart_lines, coupons, courses, enrollments, notifications, order_items, orders};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// Basket session id whose lines are materialized into the order.
    pub cart_id: String,
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub order_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyCouponRequest {
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplyCouponResponse {
    /// Number of order items the coupon was applied to (0 when none of the
    /// order's teachers issued this coupon).
    pub discounted_items: usize,
    pub saved: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub price: String,
    pub tax_fee: String,
    pub total: String,
    pub initial_total: String,
    pub saved: String,
    pub applied_coupon: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub sub_total: String,
    pub tax_fee: String,
    pub total: String,
    pub initial_total: String,
    pub saved: String,
    pub payment_status: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

fn order_response(order: Order, items: Vec<OrderItem>) -> OrderResponse {
    OrderResponse {
        id: order.id,
        student_id: order.student_id,
        sub_total: order.sub_total.to_string(),
        tax_fee: order.tax_fee.to_string(),
        total: order.total.to_string(),
        initial_total: order.initial_total.to_string(),
        saved: order.saved.to_string(),
        payment_status: order.payment_status,
        full_name: order.full_name,
        email: order.email,
        country: order.country,
        created_at: order.created_at.to_rfc3339(),
        items: items
            .into_iter()
            .map(|i| OrderItemResponse {
                id: i.id,
                course_id: i.course_id,
                teacher_id: i.teacher_id,
                price: i.price.to_string(),
                tax_fee: i.tax_fee.to_string(),
                total: i.total.to_string(),
                initial_total: i.initial_total.to_string(),
                saved: i.saved.to_string(),
                applied_coupon: i.applied_coupon,
            })
            .collect(),
    }
}

fn load_order(conn: &mut PgConnection, id: Uuid) -> Result<Order, AppError> {
    orders::table
        .filter(orders::id.eq(id))
        .select(Order::as_select())
        .first(conn)
        .optional()?
        .ok_or(AppError::NotFound)
}

fn current_status(order: &Order) -> Result<PaymentStatus, AppError> {
    order.payment_status.parse().map_err(AppError::Internal)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders/checkout
///
/// Materializes the cart session into an order plus one item per cart line,
/// all inside a single transaction. The order starts in `Processing`;
/// `initial_total` snapshots the pre-discount total and `saved` starts at
/// zero. Cart lines are left in place for the client to clear after payment.
#[utoipa::path(
    post,
    path = "/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order created", body = CheckoutResponse),
        (status = 400, description = "Cart is empty"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn checkout(
    pool: web::Data<DbPool>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let order_id = web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            let lines: Vec<(CartLine, Course)> = cart_lines::table
                .inner_join(courses::table)
                .filter(cart_lines::cart_id.eq(&body.cart_id))
                .select((CartLine::as_select(), Course::as_select()))
                .load(conn)?;

            if lines.is_empty() {
                return Err(AppError::BadRequest(format!(
                    "cart '{}' is empty",
                    body.cart_id
                )));
            }

            let mut sub_total = BigDecimal::zero();
            let mut tax_fee = BigDecimal::zero();
            let mut total = BigDecimal::zero();
            for (line, _) in &lines {
                sub_total += &line.price;
                tax_fee += &line.tax_fee;
                total += &line.total;
            }

            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrder {
                    id: order_id,
                    student_id: body.user_id,
                    sub_total,
                    tax_fee,
                    initial_total: total.clone(),
                    total,
                    saved: BigDecimal::zero(),
                    payment_status: PaymentStatus::Processing.to_string(),
                    full_name: body.full_name.clone(),
                    email: body.email.clone(),
                    country: body.country.clone(),
                })
                .execute(conn)?;

            let new_items: Vec<NewOrderItem> = lines
                .iter()
                .map(|(line, course)| NewOrderItem {
                    id: Uuid::new_v4(),
                    order_id,
                    course_id: line.course_id,
                    teacher_id: course.teacher_id,
                    price: line.price.clone(),
                    tax_fee: line.tax_fee.clone(),
                    total: line.total.clone(),
                    initial_total: line.total.clone(),
                    saved: BigDecimal::zero(),
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&new_items)
                .execute(conn)?;

            Ok(order_id)
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CheckoutResponse { order_id }))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let (order, items) = web::block(move || {
        let mut conn = pool.get()?;

        let order = load_order(&mut conn, order_id)?;
        let items = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .order(order_items::created_at.asc())
            .select(OrderItem::as_select())
            .load(&mut conn)?;

        Ok::<_, AppError>((order, items))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(order_response(order, items)))
}

/// POST /orders/{id}/coupon
///
/// Applies a teacher-issued percent coupon to a pending order. Only items
/// sold by the coupon's teacher and not yet discounted are touched; the
/// item and order totals shrink by the discount while `saved` grows by it.
/// Zero matching items is a successful no-op.
#[utoipa::path(
    post,
    path = "/orders/{id}/coupon",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Coupon processed", body = ApplyCouponResponse),
        (status = 404, description = "Order or active coupon not found"),
        (status = 409, description = "Order is no longer processing"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn apply_coupon(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<ApplyCouponRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let body = body.into_inner();

    let (discounted_items, saved) = web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            let order = load_order(conn, order_id)?;
            if current_status(&order)? != PaymentStatus::Processing {
                return Err(AppError::Conflict(
                    "coupons can only be applied while the order is processing".to_string(),
                ));
            }

            let coupon = coupons::table
                .filter(coupons::code.eq(&body.code))
                .filter(coupons::active.eq(true))
                .select(Coupon::as_select())
                .first(conn)
                .optional()?
                .ok_or(AppError::NotFound)?;

            let Some(coupon_teacher) = coupon.teacher_id else {
                return Ok((0, BigDecimal::zero()));
            };

            let items: Vec<OrderItem> = order_items::table
                .filter(order_items::order_id.eq(order.id))
                .filter(order_items::teacher_id.eq(coupon_teacher))
                .filter(order_items::applied_coupon.eq(false))
                .select(OrderItem::as_select())
                .load(conn)?;

            let mut saved_total = BigDecimal::zero();
            for item in &items {
                let discount = pricing::coupon_discount(&item.total, coupon.discount);
                diesel::update(order_items::table.find(item.id))
                    .set((
                        order_items::price.eq(&item.price - &discount),
                        order_items::total.eq(&item.total - &discount),
                        order_items::saved.eq(&item.saved + &discount),
                        order_items::coupon_id.eq(coupon.id),
                        order_items::applied_coupon.eq(true),
                    ))
                    .execute(conn)?;
                saved_total += discount;
            }

            if !saved_total.is_zero() {
                diesel::update(orders::table.find(order.id))
                    .set((
                        orders::sub_total.eq(&order.sub_total - &saved_total),
                        orders::total.eq(&order.total - &saved_total),
                        orders::saved.eq(&order.saved + &saved_total),
                    ))
                    .execute(conn)?;
            }

            Ok((items.len(), saved_total))
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ApplyCouponResponse {
        discounted_items,
        saved: saved.with_scale(2).to_string(),
    }))
}

/// PUT /orders/{id}/payment-status
///
/// Settles an order: `Processing -> Paid` or `Processing -> Failed`, both
/// terminal. A paid order enrolls the student into every purchased course and
/// records the matching notifications, in the same transaction as the status
/// flip.
#[utoipa::path(
    put,
    path = "/orders/{id}/payment-status",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = PaymentStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Illegal status transition"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_payment_status(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<PaymentStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let next: PaymentStatus = body
        .status
        .parse()
        .map_err(AppError::BadRequest)?;

    let status = web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            let order = load_order(conn, order_id)?;
            let current = current_status(&order)?;
            if !current.can_transition_to(next) {
                return Err(AppError::Conflict(format!(
                    "cannot transition payment status from {} to {}",
                    current, next
                )));
            }

            diesel::update(orders::table.find(order.id))
                .set(orders::payment_status.eq(next.to_string()))
                .execute(conn)?;

            if next == PaymentStatus::Paid {
                let items: Vec<OrderItem> = order_items::table
                    .filter(order_items::order_id.eq(order.id))
                    .select(OrderItem::as_select())
                    .load(conn)?;

                for item in &items {
                    diesel::insert_into(enrollments::table)
                        .values(&NewEnrollment {
                            id: Uuid::new_v4(),
                            course_id: item.course_id,
                            user_id: order.student_id,
                            teacher_id: Some(item.teacher_id),
                            order_item_id: item.id,
                        })
                        .execute(conn)?;

                    diesel::insert_into(notifications::table)
                        .values(&NewNotification::new_order(item.teacher_id, order.id, item.id))
                        .execute(conn)?;
                    diesel::insert_into(notifications::table)
                        .values(&NewNotification::enrollment_completed(
                            order.student_id,
                            order.id,
                            item.id,
                        ))
                        .execute(conn)?;
                }
            }

            Ok(next)
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "id": order_id, "payment_status": status.to_string() })))
}
