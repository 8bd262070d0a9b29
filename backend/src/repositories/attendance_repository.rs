//! Attendance store trait for dependency injection and testing.
//!
//! This module defines the `AttendanceStore` trait the session ledger writes
//! through, and its PostgreSQL implementation. The trait can be mocked
//! using mockall for testing purposes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::attendance::AttendanceRecord;
use crate::types::{AttendanceId, UserId};

const SELECT_COLUMNS: &str = "id, user_id, check_in, check_out, duration_seconds";

/// Persistence contract for attendance records.
///
/// The two writes are conditional so the one-open-session-per-user rule holds
/// even when requests for the same user race each other.
/// Use `MockAttendanceStore` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Find the open record for a user, if any
    async fn find_open(&self, user_id: &UserId) -> Result<Option<AttendanceRecord>, sqlx::Error>;

    /// Insert an open record unless the user already has one.
    ///
    /// Returns `None` when the insert was refused.
    async fn insert_open(
        &self,
        record: &AttendanceRecord,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error>;

    /// Close a record if it is still open.
    ///
    /// Returns `None` when the record was already closed or does not exist.
    async fn close(
        &self,
        id: AttendanceId,
        check_out: DateTime<Utc>,
        duration_seconds: i64,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error>;

    /// List a user's records, newest check-in first
    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error>;

    /// Count all records of a user
    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, sqlx::Error>;
}

/// PostgreSQL implementation of `AttendanceStore`.
#[derive(Debug, Clone)]
pub struct PgAttendanceStore {
    pool: PgPool,
}

impl PgAttendanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for PgAttendanceStore {
    async fn find_open(&self, user_id: &UserId) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM attendance_records WHERE user_id = $1 AND check_out IS NULL",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_open(
        &self,
        record: &AttendanceRecord,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        // Refused by the partial unique index when an open row already exists.
        let query = format!(
            "INSERT INTO attendance_records (id, user_id, check_in, check_out, duration_seconds) \
             VALUES ($1, $2, $3, NULL, NULL) \
             ON CONFLICT (user_id) WHERE check_out IS NULL DO NOTHING \
             RETURNING {}",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(record.id)
            .bind(&record.user_id)
            .bind(record.check_in)
            .fetch_optional(&self.pool)
            .await
    }

    async fn close(
        &self,
        id: AttendanceId,
        check_out: DateTime<Utc>,
        duration_seconds: i64,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance_records SET check_out = $2, duration_seconds = $3 \
             WHERE id = $1 AND check_out IS NULL \
             RETURNING {}",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(id)
            .bind(check_out)
            .bind(duration_seconds)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM attendance_records WHERE user_id = $1 \
             ORDER BY check_in DESC, id DESC LIMIT $2 OFFSET $3",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance_records WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
