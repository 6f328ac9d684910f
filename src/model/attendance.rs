use chrono::{DateTime, Duration, DurationRound, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ValidationError;

/// A card scan that has passed validation but is not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub card_id: String,
    pub timestamp: DateTime<Utc>,
}

/// An attendance record as held by the store, with its assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    #[schema(example = "65a4ef2c9d1e8a3b4c5d6e7f")]
    pub id: String,
    #[schema(example = "A1B2C3")]
    pub card_id: String,
    #[schema(example = "2024-01-15T08:30:00Z", value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

/// Raw create payload. Fields stay untyped until `validate` so that wrong
/// types surface as validation errors instead of extractor failures.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceRequest {
    #[schema(example = "A1B2C3", value_type = Option<String>)]
    pub card_id: Option<Value>,
    /// ISO-8601 string or milliseconds since the Unix epoch; defaults to now.
    #[schema(example = "2024-01-15T08:30:00Z", value_type = Option<String>)]
    pub timestamp: Option<Value>,
}

impl AttendanceRecord {
    /// Applies the "default to now" rule. Timestamps are cut to millisecond
    /// precision, which is what the document store keeps.
    pub fn new(card_id: String, timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        Self {
            card_id,
            timestamp: truncate_to_millis(timestamp.unwrap_or(now)),
        }
    }
}

impl RecordAttendanceRequest {
    /// An empty body, or JSON that is not an object, carries no fields.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;

        match value {
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|_| ValidationError::MalformedBody)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(self, now: DateTime<Utc>) -> Result<AttendanceRecord, ValidationError> {
        let card_id = match self.card_id {
            Some(Value::String(id)) if !id.is_empty() => id,
            _ => return Err(ValidationError::MissingCardId),
        };

        let timestamp = match self.timestamp {
            Some(value) => parse_timestamp(&value)?,
            None => None,
        };

        Ok(AttendanceRecord::new(card_id, timestamp, now))
    }
}

/// `Ok(None)` means "not supplied": null, `""`, `0` and `false` all fall
/// back to the server clock.
pub fn parse_timestamp(value: &Value) -> Result<Option<DateTime<Utc>>, ValidationError> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => parse_timestamp_str(s.trim())
            .map(Some)
            .ok_or(ValidationError::InvalidTimestamp),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => match n.as_f64() {
                    Some(ms) if ms.is_finite() => ms.trunc() as i64,
                    _ => return Err(ValidationError::InvalidTimestamp),
                },
            };
            if millis == 0 {
                return Ok(None);
            }
            DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or(ValidationError::InvalidTimestamp)
        }
        _ => Err(ValidationError::InvalidTimestamp),
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Zone-less forms are read as UTC.
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(Duration::milliseconds(1)).unwrap_or(ts)
}
