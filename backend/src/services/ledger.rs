//! The session ledger: check-in/check-out state transitions.
//!
//! A user has at most one open session. Check-in opens one, check-out closes
//! it and records the elapsed whole seconds. Closed records never change.

use std::sync::Arc;
use thiserror::Error;

use crate::{
    models::attendance::{AttendanceRecord, HistoryPage},
    repositories::AttendanceStore,
    types::UserId,
    utils::{
        pagination,
        time::{elapsed_whole_seconds, to_stored_precision, Clock},
    },
};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("user already has an open session")]
    Conflict,
    #[error("no active session")]
    InvalidState,
    #[error("attendance store error: {0}")]
    Store(#[from] sqlx::Error),
}

pub struct SessionLedger {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
}

impl SessionLedger {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn check_in(&self, user_id: &UserId) -> Result<AttendanceRecord, LedgerError> {
        if self.store.find_open(user_id).await?.is_some() {
            tracing::warn!(user_id = %user_id, "check-in refused: session already open");
            return Err(LedgerError::Conflict);
        }

        let record = AttendanceRecord::open(user_id.clone(), self.now());
        let Some(saved) = self.store.insert_open(&record).await? else {
            // Another check-in for this user landed between the lookup and the insert.
            tracing::warn!(user_id = %user_id, "check-in refused: concurrent session opened");
            return Err(LedgerError::Conflict);
        };

        tracing::info!(user_id = %user_id, attendance_id = %saved.id, "checked in");
        Ok(saved)
    }

    pub async fn check_out(&self, user_id: &UserId) -> Result<AttendanceRecord, LedgerError> {
        let Some(open) = self.store.find_open(user_id).await? else {
            tracing::warn!(user_id = %user_id, "check-out refused: no active session");
            return Err(LedgerError::InvalidState);
        };

        let now = self.now();
        let duration_seconds = match elapsed_whole_seconds(open.check_in, now) {
            Some(seconds) => seconds,
            None => {
                tracing::warn!(
                    user_id = %user_id,
                    attendance_id = %open.id,
                    check_in = %open.check_in,
                    check_out = %now,
                    "clock moved backwards during session; recording zero duration"
                );
                0
            }
        };

        let closed = self
            .store
            .close(open.id, now, duration_seconds)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, attendance_id = %open.id, "check-out refused: session closed concurrently");
                LedgerError::InvalidState
            })?;

        tracing::info!(
            user_id = %user_id,
            attendance_id = %closed.id,
            duration_seconds,
            "checked out"
        );
        Ok(closed)
    }

    pub async fn is_working(&self, user_id: &UserId) -> Result<bool, LedgerError> {
        Ok(self.current_session(user_id).await?.is_some())
    }

    /// The open session for a user, if there is one.
    pub async fn current_session(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AttendanceRecord>, LedgerError> {
        Ok(self.store.find_open(user_id).await?)
    }

    /// Lists a user's records newest first.
    ///
    /// `page` and `limit` must both be at least 1.
    pub async fn list_history(
        &self,
        user_id: &UserId,
        page: u32,
        limit: u32,
    ) -> Result<HistoryPage, LedgerError> {
        debug_assert!(page >= 1 && limit >= 1, "page and limit start at 1");

        let offset = pagination::offset(page, limit);
        let data = self
            .store
            .list_by_user(user_id, i64::from(limit), offset)
            .await?;
        let total = self.store.count_by_user(user_id).await?;

        Ok(HistoryPage {
            data,
            total,
            page,
            last_page: pagination::last_page(total, limit),
        })
    }

    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        to_stored_precision(self.clock.now())
    }
}
