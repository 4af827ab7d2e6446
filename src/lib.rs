//! Server library - exposes the main modules for the tests

pub mod config;
pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export the main types to shorten imports
pub use crate::core::{AppError, AppState};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::core::auth::authentication_middleware;
use crate::services::*;

/// Builds the application router. Every nested resource sits behind the
/// JWT authentication middleware; only the health route is open.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/requests", configure_request_routes(state.clone()))
        .nest("/chats", configure_chat_routes(state.clone()))
        .nest("/messages", configure_message_routes(state.clone()))
        .nest(
            "/notifications",
            configure_notification_routes(state.clone()),
        )
        .nest("/teachers", configure_teacher_routes(state.clone()))
        .nest("/favorites", configure_favorite_routes(state.clone()))
        .nest(
            "/availability",
            configure_availability_routes(state.clone()),
        )
        .nest("/reviews", configure_review_routes(state.clone()))
        .with_state(state)
}

fn configure_request_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_lesson_request).get(list_lesson_requests))
        .route("/{request_id}", get(get_lesson_request))
        .route("/{request_id}/status", put(update_request_status))
        .route("/{request_id}/cancel", put(cancel_lesson_request))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_chat_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_chats))
        .route("/{chat_id}", get(get_chat))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_message_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(send_message))
        .route("/chat/{chat_id}", get(list_chat_messages))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_notification_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_notifications_count))
        .route("/read-all", put(mark_all_notifications_read))
        .route("/{notification_id}/read", put(mark_notification_read))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_teacher_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(search_teachers))
        .route("/subjects", get(list_subjects))
        .route("/{teacher_id}", get(get_teacher))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_favorite_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_favorites))
        .route("/{teacher_id}", post(add_favorite).delete(remove_favorite))
        .route("/check/{teacher_id}", get(check_favorite))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_availability_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/slots",
            get(list_availability_slots).put(upsert_availability_slot),
        )
        .route("/slots/{slot_id}", delete(delete_availability_slot))
        .route("/days", get(list_available_days).put(upsert_available_day))
        .route("/days/{day_id}", delete(delete_available_day))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_review_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_review))
        .route("/{review_id}", put(update_review))
        .route("/teacher/{teacher_id}", get(list_teacher_reviews))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
