//! In-process attendance store.
//!
//! Used when no database is configured and throughout the test-suite. Every
//! operation runs under a single lock, so the conditional writes are atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tokio::sync::RwLock;

use super::attendance_repository::AttendanceStore;
use crate::models::attendance::AttendanceRecord;
use crate::types::{AttendanceId, UserId};

#[derive(Debug, Default)]
pub struct MemoryAttendanceStore {
    records: RwLock<Vec<AttendanceRecord>>,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record as-is, bypassing the open-session check.
    pub async fn seed(&self, record: AttendanceRecord) {
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn find_open(&self, user_id: &UserId) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| &r.user_id == user_id && r.is_open())
            .cloned())
    }

    async fn insert_open(
        &self,
        record: &AttendanceRecord,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|r| r.user_id == record.user_id && r.is_open())
        {
            return Ok(None);
        }
        records.push(record.clone());
        Ok(Some(record.clone()))
    }

    async fn close(
        &self,
        id: AttendanceId,
        check_out: DateTime<Utc>,
        duration_seconds: i64,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id && r.is_open()) else {
            return Ok(None);
        };
        record.check_out = Some(check_out);
        record.duration_seconds = Some(duration_seconds);
        Ok(Some(record.clone()))
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let records = self.records.read().await;
        let mut owned: Vec<&AttendanceRecord> =
            records.iter().filter(|r| &r.user_id == user_id).collect();
        owned.sort_by_key(|r| (Reverse(r.check_in), Reverse(r.id)));

        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(owned.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, sqlx::Error> {
        let records = self.records.read().await;
        let count = records.iter().filter(|r| &r.user_id == user_id).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}
