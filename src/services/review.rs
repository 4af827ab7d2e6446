//! Review services - students rate teachers after confirmed lessons

use crate::core::{AppError, AppState};
use crate::dtos::{CreateReviewDTO, NewReviewDTO, ReviewDTO, UpdateReviewDTO};
use crate::entities::{Review, User, UserRole};
use crate::repositories::{Create, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, payload), fields(student_id = %current_user.id))]
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<NewReviewDTO>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    debug!("Creating review");
    // 1. Only students may leave reviews
    // 2. Validate rating range and comment length
    // 3. A review that references a lesson request must point at a confirmed
    //    request between this student and this teacher
    // 4. Insert; a duplicate (teacher, student, request) triple maps to 409

    if current_user.role != UserRole::Student {
        warn!("Non-student tried to create a review");
        return Err(AppError::forbidden("Only students can leave reviews"));
    }
    payload.validate()?;

    let teacher_id = payload
        .teacher_id
        .ok_or_else(|| AppError::bad_request("teacher_id is required"))?;
    let rating = payload
        .rating
        .ok_or_else(|| AppError::bad_request("rating is required"))?;

    state
        .user
        .find_teacher(&teacher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

    if let Some(request_id) = payload.lesson_request_id {
        let confirmed = state
            .review
            .has_confirmed_request(&request_id, &current_user.id, &teacher_id)
            .await?;
        if !confirmed {
            return Err(AppError::bad_request(
                "Review must reference a confirmed lesson request",
            ));
        }
    }

    let review = state
        .review
        .create(&CreateReviewDTO {
            teacher_id,
            student_id: current_user.id,
            lesson_request_id: payload.lesson_request_id,
            rating,
            comment: payload.comment.clone(),
        })
        .await?;

    info!("Review {} created for teacher {}", review.id, teacher_id);
    Ok((StatusCode::CREATED, Json(review)))
}

#[instrument(skip(state), fields(teacher_id = %teacher_id))]
pub async fn list_teacher_reviews(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<i64>,
) -> Result<Json<Vec<ReviewDTO>>, AppError> {
    debug!("Listing reviews for teacher");
    state
        .user
        .find_teacher(&teacher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

    let reviews = state.review.find_for_teacher(&teacher_id).await?;

    info!("Found {} reviews", reviews.len());
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, current_user, payload), fields(review_id = %review_id, student_id = %current_user.id))]
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(review_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<UpdateReviewDTO>,
) -> Result<Json<Review>, AppError> {
    debug!("Updating review");
    if current_user.role != UserRole::Student {
        warn!("Non-student tried to update a review");
        return Err(AppError::forbidden("Only students can update reviews"));
    }
    payload.validate()?;
    if payload.rating.is_none() && payload.comment.is_none() {
        return Err(AppError::bad_request("No fields to update"));
    }

    // Ownership check doubles as existence check
    let review = state
        .review
        .read(&review_id)
        .await?
        .filter(|r| r.student_id == current_user.id)
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    let updated = state.review.update(&review.id, &payload).await?;

    info!("Review {} updated", review_id);
    Ok(Json(updated))
}
