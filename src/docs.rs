use crate::api::attendance::RecordAttendanceResponse;
use crate::error::MessageBody;
use crate::model::attendance::{RecordAttendanceRequest, StoredRecord};
use crate::utils::pagination::ListQuery;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Recorder API",
        version = "0.1.0",
        description = r#"
## RFID Attendance Recorder

Card readers post each scan to `POST /attendance`; the service stores it as a
timestamped attendance record in MongoDB.

- `cardId` is required and must be a non-empty string
- `timestamp` is optional (ISO-8601 string or epoch milliseconds); the server
  clock is used when it is absent
- `GET /attendance` returns every stored record, or one page of them when
  `page` / `per_page` are given

No authentication is applied; any origin may call the API.
"#,
    ),
    paths(
        crate::api::attendance::record_attendance,
        crate::api::attendance::list_attendance,
        crate::api::health::health
    ),
    components(
        schemas(
            RecordAttendanceRequest,
            RecordAttendanceResponse,
            StoredRecord,
            MessageBody,
            ListQuery
        )
    ),
    tags(
        (name = "Attendance", description = "Card-scan ingestion and listing"),
        (name = "Health", description = "Service liveness"),
    )
)]
pub struct ApiDoc;
