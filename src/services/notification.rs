//! Notification services - per-user feed and read-state management

use crate::core::{AppError, AppState};
use crate::dtos::NotificationsQuery;
use crate::entities::{Notification, User};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    debug!("Listing notifications");
    let notifications = state
        .notification
        .find_many_by_user(&current_user.id, query.is_read, query.limit)
        .await?;

    info!("Found {} notifications", notifications.len());
    Ok(Json(notifications))
}

#[instrument(skip(state, current_user), fields(notification_id = %notification_id, user_id = %current_user.id))]
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Path(notification_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Notification>, AppError> {
    debug!("Marking notification as read");
    let notification = state
        .notification
        .mark_read(&notification_id, &current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Notification not found"))?;

    Ok(Json(notification))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn mark_all_notifications_read(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Marking all notifications as read");
    let marked = state.notification.mark_all_read(&current_user.id).await?;

    info!("Marked {} notifications as read", marked);
    Ok(Json(json!({ "message": "All notifications marked as read" })))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn unread_notifications_count(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let count = state.notification.unread_count(&current_user.id).await?;
    Ok(Json(json!({ "count": count })))
}
