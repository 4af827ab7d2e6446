//! Chat services - chat overviews and the message log view

use crate::core::{AppError, AppState};
use crate::dtos::{ChatDetailDTO, ChatOverviewDTO, UserSummaryDTO};
use crate::entities::User;
use crate::repositories::Read;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<ChatOverviewDTO>>, AppError> {
    debug!("Listing chats");
    let rows = state
        .chat
        .find_overviews_for_user(&current_user.id, &current_user.role)
        .await?;

    info!("Found {} chats", rows.len());
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, current_user), fields(chat_id = %chat_id, user_id = %current_user.id))]
pub async fn get_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<ChatDetailDTO>, AppError> {
    debug!("Reading chat");
    // 1. Load the chat if the viewer participates in it
    // 2. Resolve the other participant
    // 3. Load the full message log, oldest first
    // 4. Stamp the viewer's read cursor; the payload keeps the pre-read state

    let chat = state
        .chat
        .find_for_participant(&chat_id, &current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Chat not found"))?;

    let other_id = chat.counterpart_of(current_user.id);
    let other_user = state
        .user
        .read(&other_id)
        .await?
        .ok_or_else(|| AppError::not_found("Chat not found"))?;

    let messages = state.msg.find_many_by_chat_id(&chat.id).await?;

    let now = Utc::now();
    let marked = state.msg.mark_read(&chat.id, &current_user.id, &now).await?;
    if marked > 0 {
        debug!("Marked {} messages as read", marked);
    }

    Ok(Json(ChatDetailDTO {
        id: chat.id,
        lesson_request_id: chat.lesson_request_id,
        created_at: chat.created_at,
        updated_at: chat.updated_at,
        other_user: UserSummaryDTO::from(&other_user),
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}
