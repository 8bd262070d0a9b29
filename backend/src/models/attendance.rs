use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::{AttendanceId, UserId};

/// One check-in/check-out session.
///
/// A record is open while `check_out` is `None`. Closing it sets `check_out`
/// and `duration_seconds` together, after which the record never changes.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub user_id: UserId,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
}

impl AttendanceRecord {
    pub fn open(user_id: UserId, check_in: DateTime<Utc>) -> Self {
        Self {
            id: AttendanceId::new(),
            user_id,
            check_in,
            check_out: None,
            duration_seconds: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// Returns the record as it looks once closed at `check_out`.
    pub fn closed(mut self, check_out: DateTime<Utc>, duration_seconds: i64) -> Self {
        self.check_out = Some(check_out);
        self.duration_seconds = Some(duration_seconds);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: AttendanceId,
    #[schema(value_type = String, example = "mock-user")]
    pub user_id: UserId,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    /// Whole seconds between check-in and check-out; null while the session is open.
    #[schema(example = 28800)]
    pub duration: Option<i64>,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            check_in: record.check_in,
            check_out: record.check_out,
            duration: record.duration_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatusResponse {
    pub is_working: bool,
    /// Start of the open session, if any.
    pub check_in: Option<DateTime<Utc>>,
}

/// A window of a user's history, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage {
    pub data: Vec<AttendanceRecord>,
    pub total: i64,
    pub page: u32,
    pub last_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub data: Vec<AttendanceResponse>,
    pub total: i64,
    pub page: u32,
    pub last_page: u32,
}

impl From<HistoryPage> for HistoryResponse {
    fn from(page: HistoryPage) -> Self {
        Self {
            data: page.data.into_iter().map(AttendanceResponse::from).collect(),
            total: page.total,
            page: page.page,
            last_page: page.last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user() -> UserId {
        UserId::parse("mock-user").unwrap()
    }

    #[test]
    fn open_record_has_no_check_out() {
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let record = AttendanceRecord::open(user(), at);
        assert!(record.is_open());
        assert_eq!(record.check_in, at);
        assert!(record.duration_seconds.is_none());
    }

    #[test]
    fn closed_record_carries_duration() {
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let out = at + chrono::Duration::seconds(10);
        let record = AttendanceRecord::open(user(), at).closed(out, 10);
        assert!(!record.is_open());
        assert_eq!(record.check_out, Some(out));
        assert_eq!(record.duration_seconds, Some(10));
    }

    #[test]
    fn response_uses_camel_case_keys() {
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let record = AttendanceRecord::open(user(), at);
        let json = serde_json::to_value(AttendanceResponse::from(record)).unwrap();
        assert_eq!(json["userId"], "mock-user");
        assert!(json["checkIn"].is_string());
        assert!(json["checkOut"].is_null());
        assert!(json["duration"].is_null());
    }

    #[test]
    fn history_response_uses_last_page_key() {
        let page = HistoryPage {
            data: Vec::new(),
            total: 0,
            page: 1,
            last_page: 0,
        };
        let json = serde_json::to_value(HistoryResponse::from(page)).unwrap();
        assert_eq!(json["lastPage"], 0);
        assert_eq!(json["total"], 0);
    }
}
