use utoipa::OpenApi;

use crate::handlers::{cart, catalog, notifications, orders, reviews};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Marketplace API",
        description = "Course catalog, cart pricing, checkout and reviews."
    ),
    paths(
        catalog::list_categories,
        catalog::list_courses,
        catalog::course_detail,
        catalog::course_rating,
        catalog::course_reviews,
        cart::upsert_cart_line,
        cart::list_cart,
        cart::delete_cart_line,
        cart::cart_stats,
        orders::checkout,
        orders::get_order,
        orders::apply_coupon,
        orders::update_payment_status,
        reviews::create_review,
        notifications::teacher_notifications,
        notifications::mark_seen,
    ),
    components(schemas(
        catalog::CategoryResponse,
        catalog::CourseResponse,
        catalog::CourseRatingResponse,
        catalog::ReviewResponse,
        catalog::ListCoursesResponse,
        cart::UpsertCartLineRequest,
        cart::CartLineResponse,
        cart::CartTotalsResponse,
        orders::CheckoutRequest,
        orders::CheckoutResponse,
        orders::ApplyCouponRequest,
        orders::ApplyCouponResponse,
        orders::PaymentStatusRequest,
        orders::OrderItemResponse,
        orders::OrderResponse,
        reviews::CreateReviewRequest,
        reviews::CreateReviewResponse,
        notifications::NotificationResponse,
    ))
)]
pub struct ApiDoc;
