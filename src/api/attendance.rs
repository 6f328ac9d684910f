use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::error::{ApiError, MessageBody, ValidationError};
use crate::model::attendance::{RecordAttendanceRequest, StoredRecord};
use crate::service::AttendanceService;
use crate::utils::pagination::ListQuery;

pub const RECORDED_MESSAGE: &str = "Attendance recorded successfully!";

#[derive(Serialize, ToSchema)]
pub struct RecordAttendanceResponse {
    #[schema(example = "Attendance recorded successfully!")]
    pub message: String,
    pub attendance: StoredRecord,
}

/// Record a card scan
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = RecordAttendanceRequest,
    responses(
        (status = 201, description = "Attendance recorded", body = RecordAttendanceResponse),
        (status = 400, description = "Missing card id or bad timestamp", body = MessageBody, example = json!({
            "message": "Card ID is required."
        })),
        (status = 500, description = "Storage failure", body = MessageBody, example = json!({
            "message": "Internal server error."
        }))
    ),
    tag = "Attendance"
)]
pub async fn record_attendance(
    service: web::Data<AttendanceService>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let record = RecordAttendanceRequest::from_body(&body)
        .and_then(|request| {
            debug!(?request, "Attendance payload received");
            request.validate(Utc::now())
        })
        .inspect_err(|e| warn!(error = %e, "Rejected attendance payload"))?;

    let stored = service
        .record(record)
        .await
        .inspect_err(|e| error!(error = %e, "Error recording attendance"))?;

    info!(
        id = %stored.id,
        card_id = %stored.card_id,
        timestamp = %stored.timestamp,
        "Attendance recorded"
    );

    Ok(HttpResponse::Created().json(RecordAttendanceResponse {
        message: RECORDED_MESSAGE.to_string(),
        attendance: stored,
    }))
}

/// List attendance records
///
/// Without paging parameters the entire collection is returned.
#[utoipa::path(
    get,
    path = "/attendance",
    params(ListQuery),
    responses(
        (status = 200, description = "All stored records", body = [StoredRecord]),
        (status = 400, description = "Malformed query string", body = MessageBody),
        (status = 500, description = "Storage failure", body = MessageBody, example = json!({
            "message": "Internal server error."
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    service: web::Data<AttendanceService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = service
        .list(query.page_request())
        .await
        .inspect_err(|e| error!(error = %e, "Error fetching attendance"))?;

    debug!(count = records.len(), "Attendance listed");

    Ok(HttpResponse::Ok().json(records))
}

/// Turns query-string extractor failures into the JSON error shape.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError::from(ValidationError::InvalidQuery(err.to_string())).into()
}
