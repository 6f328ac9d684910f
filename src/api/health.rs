use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::service::AttendanceService;

/// Liveness of the service and its document store
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = Object, example = json!({
            "status": "ok"
        })),
        (status = 503, description = "Store unreachable", body = Object, example = json!({
            "status": "unavailable"
        }))
    ),
    tag = "Health"
)]
pub async fn health(service: web::Data<AttendanceService>) -> impl Responder {
    match service.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok" })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
        }
    }
}
