use crate::api::AppState;
use crate::api::schemas::auth::{Login, Registration, TokenResponse, UserResponse};
use crate::error::{AppError, Result};
use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};

pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Registration>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| AppError::BadRequest("invalid json".to_string()))?;

    let user = state.account_service.register(payload.username, payload.password).await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Login>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| AppError::BadRequest("invalid json".to_string()))?;

    let user = state.account_service.verify(payload.username, payload.password).await?;
    let token = state.token_service.issue(&user.username)?;

    Ok(Json(TokenResponse { token }))
}
