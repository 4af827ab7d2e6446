//! Lesson request services - create, list, decide and cancel requests

use crate::core::{AppError, AppState};
use crate::dtos::{
    CreateLessonRequestDTO, CreateNotificationDTO, LessonRequestDetailDTO, LessonRequestViewDTO,
    NewLessonRequestDTO, RequestsQuery, UpdateRequestStatusDTO,
};
use crate::entities::{LessonRequest, RequestStatus, User, UserRole};
use crate::repositories::{Create, Read};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, payload), fields(student_id = %current_user.id))]
pub async fn create_lesson_request(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<NewLessonRequestDTO>,
) -> Result<(StatusCode, Json<LessonRequest>), AppError> {
    debug!("Creating lesson request");
    // 1. Only students may open lesson requests
    // 2. Validate the payload (time format, message length)
    // 3. Resolve the target teacher; unknown or non-teacher ids are 404
    // 4. Insert the request in the pending state
    // 5. Notify the teacher best-effort and return 201

    if current_user.role != UserRole::Student {
        warn!("Non-student tried to create a lesson request");
        return Err(AppError::forbidden(
            "Only students can create lesson requests",
        ));
    }
    payload.validate()?;
    let teacher_id = payload
        .teacher_id
        .ok_or_else(|| AppError::bad_request("teacher_id is required"))?;

    let teacher = state
        .user
        .find_teacher(&teacher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

    let request = state
        .request
        .create(&CreateLessonRequestDTO {
            student_id: current_user.id,
            teacher_id,
            requested_date: payload.requested_date,
            requested_time: payload.requested_time.clone(),
            message: payload.message.clone(),
        })
        .await?;

    state
        .dispatcher
        .notify(CreateNotificationDTO::new(
            teacher.id,
            "lesson_request",
            "New Lesson Request",
            format!("You have a new lesson request from {}", current_user.name),
            Some(request.id),
            Some("lesson_request"),
        ))
        .await;

    info!("Lesson request {} created", request.id);
    Ok((StatusCode::CREATED, Json(request)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_lesson_requests(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(query): Query<RequestsQuery>,
) -> Result<Json<Vec<LessonRequestViewDTO>>, AppError> {
    debug!("Listing lesson requests");
    let rows = state
        .request
        .find_for_user(&current_user.id, &current_user.role, query.status.as_ref())
        .await?;

    info!("Found {} lesson requests", rows.len());
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, current_user), fields(request_id = %request_id, user_id = %current_user.id))]
pub async fn get_lesson_request(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<LessonRequestDetailDTO>, AppError> {
    debug!("Reading lesson request");
    let request = state
        .request
        .read_for_participant(&request_id, &current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson request not found"))?;

    let student = state
        .user
        .read(&request.student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson request not found"))?;
    let teacher = state
        .user
        .read(&request.teacher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson request not found"))?;

    Ok(Json(LessonRequestDetailDTO::from_parts(
        request, &student, &teacher,
    )))
}

#[instrument(skip(state, current_user, payload), fields(request_id = %request_id, teacher_id = %current_user.id))]
pub async fn update_request_status(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<UpdateRequestStatusDTO>,
) -> Result<Json<LessonRequest>, AppError> {
    debug!("Deciding lesson request");
    // 1. Only the addressed teacher may decide a request
    // 2. Parse the target status; only confirmed/rejected are accepted here
    // 3. Flip the pending row atomically; 0 rows means it was already decided
    // 4. On confirm, provision the chat inside the same transaction
    // 5. Commit, then notify the student best-effort

    if current_user.role != UserRole::Teacher {
        warn!("Non-teacher tried to decide a lesson request");
        return Err(AppError::forbidden(
            "Only teachers can decide lesson requests",
        ));
    }

    let status = match payload.status.as_deref() {
        Some("confirmed") => RequestStatus::Confirmed,
        Some("rejected") => RequestStatus::Rejected,
        _ => {
            return Err(AppError::bad_request(
                "status must be 'confirmed' or 'rejected'",
            ));
        }
    };

    let request = state
        .request
        .read(&request_id)
        .await?
        .filter(|r| r.teacher_id == current_user.id)
        .ok_or_else(|| AppError::not_found("Lesson request not found"))?;

    let now = Utc::now();
    let mut tx = state.pool.begin().await?;

    let updated_rows = state
        .request
        .transition(&mut tx, &request_id, &status, &now)
        .await?;
    if updated_rows == 0 {
        warn!("Lesson request {} was already decided", request_id);
        return Err(AppError::conflict("Lesson request is no longer pending"));
    }

    if status == RequestStatus::Confirmed {
        let chat = state
            .chat
            .ensure_chat(&mut tx, &request.student_id, &current_user.id, &request_id)
            .await?;
        debug!("Chat {} ready for lesson request {}", chat.id, request_id);
    }

    tx.commit().await?;

    let (kind, title, message) = match status {
        RequestStatus::Confirmed => (
            "lesson_confirmed",
            "Lesson Confirmed",
            format!(
                "Your lesson request has been confirmed by {}",
                current_user.name
            ),
        ),
        _ => (
            "lesson_rejected",
            "Lesson Rejected",
            format!(
                "Your lesson request has been rejected by {}",
                current_user.name
            ),
        ),
    };
    state
        .dispatcher
        .notify(CreateNotificationDTO::new(
            request.student_id,
            kind,
            title,
            message,
            Some(request_id),
            Some("lesson_request"),
        ))
        .await;

    info!("Lesson request {} moved to {:?}", request_id, status);
    Ok(Json(LessonRequest {
        status,
        updated_at: now,
        ..request
    }))
}

#[instrument(skip(state, current_user), fields(request_id = %request_id, student_id = %current_user.id))]
pub async fn cancel_lesson_request(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<LessonRequest>, AppError> {
    debug!("Cancelling lesson request");
    // 1. Only the student who opened the request may cancel it
    // 2. Flip the pending row atomically; 0 rows means it was already decided
    // 3. Notify the teacher best-effort

    if current_user.role != UserRole::Student {
        warn!("Non-student tried to cancel a lesson request");
        return Err(AppError::forbidden(
            "Only students can cancel lesson requests",
        ));
    }

    let request = state
        .request
        .read(&request_id)
        .await?
        .filter(|r| r.student_id == current_user.id)
        .ok_or_else(|| AppError::not_found("Lesson request not found"))?;

    let now = Utc::now();
    let mut conn = state.pool.acquire().await?;
    let updated_rows = state
        .request
        .transition(&mut conn, &request_id, &RequestStatus::Cancelled, &now)
        .await?;
    if updated_rows == 0 {
        warn!("Lesson request {} was already decided", request_id);
        return Err(AppError::conflict("Lesson request is no longer pending"));
    }

    state
        .dispatcher
        .notify(CreateNotificationDTO::new(
            request.teacher_id,
            "lesson_cancelled",
            "Lesson Cancelled",
            format!(
                "The lesson request from {} has been cancelled",
                current_user.name
            ),
            Some(request_id),
            Some("lesson_request"),
        ))
        .await;

    info!("Lesson request {} cancelled", request_id);
    Ok(Json(LessonRequest {
        status: RequestStatus::Cancelled,
        updated_at: now,
        ..request
    }))
}
