use actix_web::{HttpResponse, Responder, get};
use chrono::Utc;

use crate::dto::api::{ApiResponse, HealthStatus, ServiceInfo};

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok",
        timestamp: Utc::now(),
    })
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        message: "CRM API Server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Fallback for paths no route claims.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(
        "Not Found",
        "The requested resource was not found",
    ))
}
