pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod pricing;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let api_doc = openapi::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/courses")
                    .route("", web::get().to(handlers::catalog::list_courses))
                    .route("/categories", web::get().to(handlers::catalog::list_categories))
                    .route("/{slug}", web::get().to(handlers::catalog::course_detail))
                    .route("/{id}/rating", web::get().to(handlers::catalog::course_rating))
                    .route("/{slug}/reviews", web::get().to(handlers::catalog::course_reviews)),
            )
            .service(
                web::scope("/cart")
                    .route("", web::post().to(handlers::cart::upsert_cart_line))
                    .route("/stats/{cart_id}", web::get().to(handlers::cart::cart_stats))
                    .route("/{cart_id}", web::get().to(handlers::cart::list_cart))
                    .route(
                        "/{cart_id}/{item_id}",
                        web::delete().to(handlers::cart::delete_cart_line),
                    ),
            )
            .service(
                web::scope("/orders")
                    .route("/checkout", web::post().to(handlers::orders::checkout))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route("/{id}/coupon", web::post().to(handlers::orders::apply_coupon))
                    .route(
                        "/{id}/payment-status",
                        web::put().to(handlers::orders::update_payment_status),
                    ),
            )
            .service(
                web::scope("/reviews")
                    .route("", web::post().to(handlers::reviews::create_review)),
            )
            .service(
                web::scope("/notifications")
                    .route(
                        "/teacher/{teacher_id}",
                        web::get().to(handlers::notifications::teacher_notifications),
                    )
                    .route(
                        "/{id}/seen",
                        web::put().to(handlers::notifications::mark_seen),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api_doc.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
