//! Favorite services - student bookmarks of teachers

use crate::core::{AppError, AppState};
use crate::dtos::TeacherDTO;
use crate::entities::{User, UserRole};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use futures::future::try_join_all;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

fn require_student(current_user: &User) -> Result<(), AppError> {
    if current_user.role != UserRole::Student {
        warn!("Non-student tried to use favorites");
        return Err(AppError::forbidden("Only students can use favorites"));
    }
    Ok(())
}

#[instrument(skip(state, current_user), fields(student_id = %current_user.id))]
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<TeacherDTO>>, AppError> {
    debug!("Listing favorite teachers");
    // 1. Load the bookmarked teachers, most recent first
    // 2. Fetch each teacher's rating aggregate and subjects in parallel
    // 3. Skip entries whose teacher no longer exists

    require_student(&current_user)?;

    let bookmarked = state
        .favorite
        .list_teachers_for_student(&current_user.id)
        .await?;

    let profile_queries: Vec<_> = bookmarked
        .iter()
        .map(|teacher| state.teacher.find_profile(&teacher.id))
        .collect();
    let profiles = try_join_all(profile_queries).await?;

    let subject_queries: Vec<_> = bookmarked
        .iter()
        .map(|teacher| state.teacher.subjects_for_teacher(&teacher.id))
        .collect();
    let subjects = try_join_all(subject_queries).await?;

    let teachers: Vec<TeacherDTO> = profiles
        .into_iter()
        .zip(subjects)
        .filter_map(|(profile, subjects)| {
            profile.map(|row| TeacherDTO::from_row(row, subjects))
        })
        .collect();

    info!("Found {} favorite teachers", teachers.len());
    Ok(Json(teachers))
}

#[instrument(skip(state, current_user), fields(student_id = %current_user.id, teacher_id = %teacher_id))]
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("Adding teacher to favorites");
    require_student(&current_user)?;

    state
        .user
        .find_teacher(&teacher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

    if state.favorite.exists(&current_user.id, &teacher_id).await? {
        return Err(AppError::conflict("Teacher is already in favorites"));
    }

    // A concurrent duplicate still hits the unique constraint and maps to 409
    state.favorite.add(&current_user.id, &teacher_id).await?;

    info!("Teacher {} added to favorites", teacher_id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Teacher added to favorites" })),
    ))
}

#[instrument(skip(state, current_user), fields(student_id = %current_user.id, teacher_id = %teacher_id))]
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Removing teacher from favorites");
    require_student(&current_user)?;

    let removed = state.favorite.remove(&current_user.id, &teacher_id).await?;
    if removed == 0 {
        return Err(AppError::not_found("Favorite not found"));
    }

    info!("Teacher {} removed from favorites", teacher_id);
    Ok(Json(json!({ "message": "Teacher removed from favorites" })))
}

#[instrument(skip(state, current_user), fields(student_id = %current_user.id, teacher_id = %teacher_id))]
pub async fn check_favorite(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_student(&current_user)?;

    let is_favorite = state.favorite.exists(&current_user.id, &teacher_id).await?;
    Ok(Json(json!({ "is_favorite": is_favorite })))
}
