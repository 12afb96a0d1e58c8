use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::messages::{
    BulkDelete, BulkUpdate, DeleteResponse, ListParams, MessageResponse, PaginatedMessages,
    SendMessage, UpdateResponse,
};
use crate::domain::message::{Direction, MessageFlags};
use crate::domain::page::PageRequest;
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Query, State},
    extract::rejection::JsonRejection,
    response::IntoResponse,
};

pub async fn send(
    auth_user: AuthUser,
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendMessage>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| AppError::BadRequest("invalid json".to_string()))?;

    let message = state
        .message_service
        .send(&auth_user.username, &payload.receiver, &payload.subject, &payload.body)
        .await?;

    Ok(Json(MessageResponse::from(message)))
}

pub async fn list(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse> {
    let direction = if params.sent { Direction::Outbox } else { Direction::Inbox };
    let page = PageRequest::new(params.page, params.page_size);

    let result =
        state.message_service.list(&auth_user.username, direction, params.archived, page).await?;

    Ok(Json(PaginatedMessages::from(result)))
}

pub async fn bulk_update(
    auth_user: AuthUser,
    State(state): State<AppState>,
    payload: std::result::Result<Json<BulkUpdate>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| AppError::BadRequest("invalid json".to_string()))?;

    let flags = MessageFlags { is_read: payload.is_read, is_archived: payload.is_archived };
    let updated =
        state.message_service.update_flags(&auth_user.username, &payload.ids, flags).await?;

    Ok(Json(UpdateResponse { updated }))
}

pub async fn bulk_delete(
    auth_user: AuthUser,
    State(state): State<AppState>,
    payload: std::result::Result<Json<BulkDelete>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| AppError::BadRequest("invalid json".to_string()))?;

    let deleted = state.message_service.delete(&auth_user.username, &payload.ids).await?;

    Ok(Json(DeleteResponse { deleted }))
}
