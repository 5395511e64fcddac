use actix_web::HttpResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<diesel::result::Error> for AppError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => AppError::NotFound,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Conflict(_) => HttpResponse::Conflict().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound.error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_returns_400() {
        let err = AppError::BadRequest("price must be a decimal".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn conflict_returns_409() {
        let err = AppError::Conflict("order already settled".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::CONFLICT
        );
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn bad_request_display() {
        let err = AppError::BadRequest("rating must be between 1 and 5".to_string());
        assert_eq!(err.to_string(), "Bad request: rating must be between 1 and 5");
    }

    #[test]
    fn diesel_not_found_maps_to_app_not_found() {
        let app_err: AppError = diesel::result::Error::NotFound.into();
        assert!(matches!(app_err, AppError::NotFound));
    }
}
