use axum::{
    extract::{rejection::QueryRejection, Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::attendance::{AttendanceResponse, AttendanceStatusResponse, HistoryResponse},
    state::AppState,
    validation::rules::validate_history_limit,
};

#[derive(Debug, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// 1-based page number. Defaults to 1.
    #[validate(range(min = 1))]
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,
    /// Page size. Defaults to the configured history limit.
    #[validate(range(min = 1))]
    #[param(minimum = 1, example = 5)]
    pub limit: Option<u32>,
}

impl HistoryQuery {
    /// Applies defaults and bounds, returning `(page, limit)`.
    pub fn resolve(&self, default_limit: u32, max_limit: u32) -> Result<(u32, u32), AppError> {
        self.validate()?;
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(default_limit);
        validate_history_limit(limit, max_limit)
            .map_err(|e| AppError::Validation(vec![format!("limit: {}", e.code)]))?;
        Ok((page, limit))
    }
}

pub async fn check_in(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<(StatusCode, Json<AttendanceResponse>), AppError> {
    let record = state.ledger.check_in(&user_id).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn check_out(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<AttendanceResponse>, AppError> {
    let record = state.ledger.check_out(&user_id).await?;
    Ok(Json(record.into()))
}

pub async fn get_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<AttendanceStatusResponse>, AppError> {
    let open = state.ledger.current_session(&user_id).await?;
    Ok(Json(AttendanceStatusResponse {
        is_working: open.is_some(),
        check_in: open.map(|record| record.check_in),
    }))
}

pub async fn list_history(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, AppError> {
    let Query(query) = query?;
    let (page, limit) = query.resolve(
        state.config.history_default_limit,
        state.config.history_max_limit,
    )?;
    let history = state.ledger.list_history(&user_id, page, limit).await?;
    Ok(Json(history.into()))
}
