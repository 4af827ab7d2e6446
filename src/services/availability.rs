//! Availability services - teachers manage their calendar slots and weekly
//! recurring ranges

use crate::core::{AppError, AppState};
use crate::dtos::{SlotRangeQuery, UpsertDayDTO, UpsertSlotDTO};
use crate::entities::{AvailabilitySlot, AvailableDay, User, UserRole};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

fn require_teacher(current_user: &User) -> Result<(), AppError> {
    if current_user.role != UserRole::Teacher {
        warn!("Non-teacher tried to manage availability");
        return Err(AppError::forbidden(
            "Only teachers can manage availability",
        ));
    }
    Ok(())
}

#[instrument(skip(state, current_user, payload), fields(teacher_id = %current_user.id))]
pub async fn upsert_availability_slot(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<UpsertSlotDTO>,
) -> Result<Json<AvailabilitySlot>, AppError> {
    debug!("Upserting availability slot");
    require_teacher(&current_user)?;
    payload.validate()?;

    let date = payload
        .date
        .ok_or_else(|| AppError::bad_request("date is required"))?;
    let start_time = payload
        .start_time
        .ok_or_else(|| AppError::bad_request("start_time is required"))?;
    let end_time = payload
        .end_time
        .ok_or_else(|| AppError::bad_request("end_time is required"))?;
    // Zero-padded HH:MM compares correctly as text
    if end_time <= start_time {
        return Err(AppError::bad_request("end_time must be after start_time"));
    }

    let slot = state
        .availability
        .upsert_slot(
            &current_user.id,
            &date,
            &start_time,
            &end_time,
            payload.is_available.unwrap_or(true),
        )
        .await?;

    info!("Availability slot {} upserted", slot.id);
    Ok(Json(slot))
}

#[instrument(skip(state, current_user), fields(teacher_id = %current_user.id))]
pub async fn list_availability_slots(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(query): Query<SlotRangeQuery>,
) -> Result<Json<Vec<AvailabilitySlot>>, AppError> {
    debug!("Listing own availability slots");
    require_teacher(&current_user)?;

    let slots = state
        .availability
        .find_slots(
            &current_user.id,
            query.start_date.as_ref(),
            query.end_date.as_ref(),
        )
        .await?;

    Ok(Json(slots))
}

#[instrument(skip(state, current_user), fields(slot_id = %slot_id, teacher_id = %current_user.id))]
pub async fn delete_availability_slot(
    State(state): State<Arc<AppState>>,
    Path(slot_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Deleting availability slot");
    require_teacher(&current_user)?;

    let deleted = state
        .availability
        .delete_slot(&slot_id, &current_user.id)
        .await?;
    if deleted == 0 {
        return Err(AppError::not_found("Availability slot not found"));
    }

    info!("Availability slot {} deleted", slot_id);
    Ok(Json(json!({ "message": "Availability slot deleted" })))
}

#[instrument(skip(state, current_user, payload), fields(teacher_id = %current_user.id))]
pub async fn upsert_available_day(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<UpsertDayDTO>,
) -> Result<Json<AvailableDay>, AppError> {
    debug!("Upserting weekly availability");
    require_teacher(&current_user)?;
    payload.validate()?;

    let day_of_week = payload
        .day_of_week
        .ok_or_else(|| AppError::bad_request("day_of_week is required"))?;
    let start_time = payload
        .start_time
        .ok_or_else(|| AppError::bad_request("start_time is required"))?;
    let end_time = payload
        .end_time
        .ok_or_else(|| AppError::bad_request("end_time is required"))?;
    if end_time <= start_time {
        return Err(AppError::bad_request("end_time must be after start_time"));
    }

    let day = state
        .availability
        .upsert_day(&current_user.id, day_of_week, &start_time, &end_time)
        .await?;

    info!("Weekly availability {} upserted", day.id);
    Ok(Json(day))
}

#[instrument(skip(state, current_user), fields(teacher_id = %current_user.id))]
pub async fn list_available_days(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<AvailableDay>>, AppError> {
    require_teacher(&current_user)?;

    let days = state.availability.find_days(&current_user.id).await?;
    Ok(Json(days))
}

#[instrument(skip(state, current_user), fields(day_id = %day_id, teacher_id = %current_user.id))]
pub async fn delete_available_day(
    State(state): State<Arc<AppState>>,
    Path(day_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Deleting weekly availability");
    require_teacher(&current_user)?;

    let deleted = state
        .availability
        .delete_day(&day_id, &current_user.id)
        .await?;
    if deleted == 0 {
        return Err(AppError::not_found("Weekly availability not found"));
    }

    info!("Weekly availability {} deleted", day_id);
    Ok(Json(json!({ "message": "Weekly availability deleted" })))
}
