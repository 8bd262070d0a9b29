use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState, types::UserId};

pub const USER_ID_HEADER: &str = "x-user-id";

/// The user an attendance request acts for.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

/// Resolves the acting user from `x-user-id`, falling back to the configured
/// default user when the header is absent.
pub async fn current_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = match request.headers().get(USER_ID_HEADER) {
        Some(value) => {
            let raw = value
                .to_str()
                .map_err(|_| AppError::BadRequest("x-user-id must be ASCII".to_string()))?;
            UserId::parse(raw)
                .map_err(|e| AppError::BadRequest(format!("Invalid x-user-id: {}", e.code)))?
        }
        None => state.config.default_user_id.clone(),
    };

    tracing::debug!(user_id = %user_id, "resolved current user");
    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}
