use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use crate::dto::api::ApiResponse;
use crate::services::{FieldViolation, ServiceError};

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::Validation(details) => ApiResponse::validation(details.clone()),
            ServiceError::NotFound(_) => ApiResponse::error("Not Found", self.to_string()),
            ServiceError::Conflict(_) => ApiResponse::error("Conflict", self.to_string()),
            // Already logged with its detail by the service that raised it.
            ServiceError::Internal(_) => {
                ApiResponse::error("Internal Server Error", "An unexpected error occurred")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Reports unreadable JSON bodies in the validation envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body: {err}");
    ServiceError::Validation(vec![FieldViolation::new("body", err.to_string())]).into()
}

/// Reports ill-typed query parameters in the validation envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected query string: {err}");
    ServiceError::Validation(vec![FieldViolation::new("query", err.to_string())]).into()
}
