//! Message services - sending messages and reading a chat's log

use crate::core::{AppError, AppState};
use crate::dtos::{CreateMessageDTO, CreateNotificationDTO, MessageDTO, SendMessageDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, payload), fields(sender_id = %current_user.id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<SendMessageDTO>,
) -> Result<(StatusCode, Json<MessageDTO>), AppError> {
    debug!("Sending message");
    // 1. Validate the payload; content must be non-empty
    // 2. The sender must participate in the chat, otherwise 404
    // 3. Append the message unread and bump the chat's activity timestamp
    // 4. Notify the other participant best-effort and return 201

    payload.validate()?;
    let chat_id = payload
        .chat_id
        .ok_or_else(|| AppError::bad_request("chat_id is required"))?;

    let chat = state
        .chat
        .find_for_participant(&chat_id, &current_user.id)
        .await?
        .ok_or_else(|| {
            warn!("Sender is not a participant of chat {}", chat_id);
            AppError::not_found("Chat not found")
        })?;

    let message = state
        .msg
        .create(&CreateMessageDTO {
            chat_id,
            sender_id: current_user.id,
            content: payload.content.clone(),
        })
        .await?;

    state.chat.touch(&chat_id, &message.created_at).await?;

    let recipient_id = chat.counterpart_of(current_user.id);
    state
        .dispatcher
        .notify(CreateNotificationDTO::new(
            recipient_id,
            "message",
            "New Message",
            format!("You have a new message from {}", current_user.name),
            Some(chat_id),
            Some("chat"),
        ))
        .await;

    info!("Message {} sent to chat {}", message.id, chat_id);
    Ok((
        StatusCode::CREATED,
        Json(MessageDTO::from_message(message, &current_user)),
    ))
}

#[instrument(skip(state, current_user), fields(chat_id = %chat_id, user_id = %current_user.id))]
pub async fn list_chat_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    debug!("Listing messages for chat");
    state
        .chat
        .find_for_participant(&chat_id, &current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Chat not found"))?;

    let messages = state.msg.find_many_by_chat_id(&chat_id).await?;

    info!("Found {} messages", messages.len());
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
