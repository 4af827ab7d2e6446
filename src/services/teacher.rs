//! Teacher discovery services - filtered search, profiles and the subject
//! catalog

use crate::core::{AppError, AppState};
use crate::dtos::{TeacherDTO, TeacherDetailDTO, TeacherSearchQuery};
use crate::entities::Subject;
use axum::extract::{Json, Path, Query, State};
use chrono::Utc;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[instrument(skip(state, query))]
pub async fn search_teachers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TeacherSearchQuery>,
) -> Result<Json<Vec<TeacherDTO>>, AppError> {
    debug!("Searching teachers");
    // 1. Run the filtered aggregate query, best rated first
    // 2. Fetch each teacher's subjects with parallel queries
    // 3. Zip rows and subjects into the response DTOs

    let rows = state.teacher.search(&query).await?;

    let subject_queries: Vec<_> = rows
        .iter()
        .map(|row| state.teacher.subjects_for_teacher(&row.id))
        .collect();
    let subjects = try_join_all(subject_queries).await?;

    let teachers: Vec<TeacherDTO> = rows
        .into_iter()
        .zip(subjects)
        .map(|(row, subjects)| TeacherDTO::from_row(row, subjects))
        .collect();

    info!("Found {} teachers", teachers.len());
    Ok(Json(teachers))
}

#[instrument(skip(state), fields(teacher_id = %teacher_id))]
pub async fn get_teacher(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<i64>,
) -> Result<Json<TeacherDetailDTO>, AppError> {
    debug!("Reading teacher profile");
    let row = state
        .teacher
        .find_profile(&teacher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

    let subjects = state.teacher.subjects_for_teacher(&teacher_id).await?;

    let today = Utc::now().date_naive();
    let availability = state
        .availability
        .find_upcoming_slots(&teacher_id, &today)
        .await?;
    let available_days = state.availability.find_days(&teacher_id).await?;
    let reviews = state.review.find_for_teacher(&teacher_id).await?;

    Ok(Json(TeacherDetailDTO {
        teacher: TeacherDTO::from_row(row, subjects),
        availability,
        available_days,
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn list_subjects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = state.teacher.list_subjects().await?;
    Ok(Json(subjects))
}
