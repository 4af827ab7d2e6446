//! Integration tests for the review endpoints

mod common;

#[cfg(test)]
mod review_tests {
    use super::common::{create_test_jwt, create_test_server};
    use axum_test::http::HeaderName;
    use serde_json::json;
    use sqlx::SqlitePool;

    // ============================================================
    // POST /reviews - create_review
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_create_review_without_lesson(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1); // Alice reviews Eve freely

        let response = server
            .post("/reviews")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "teacher_id": 5,
                "rating": 4,
                "comment": "Helpful conversation practice"
            }))
            .await;

        response.assert_status(axum_test::http::StatusCode::CREATED);
        let review: serde_json::Value = response.json();
        assert_eq!(review["rating"], 4);
        assert_eq!(review["student_id"], 1);
        assert!(review["lesson_request_id"].is_null());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_create_review_requires_confirmed_lesson(
        pool: SqlitePool,
    ) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        // Request 1 is Alice's but still pending
        let response = server
            .post("/reviews")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "teacher_id": 2,
                "lesson_request_id": 1,
                "rating": 5
            }))
            .await;
        response.assert_status_bad_request();

        // Request 2 is confirmed but belongs to Dan, not Alice
        let response = server
            .post("/reviews")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "teacher_id": 2,
                "lesson_request_id": 2,
                "rating": 5
            }))
            .await;
        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests", "reviews")))]
    async fn test_create_duplicate_review_conflicts(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(4); // Dan already reviewed Bob for request 2

        let response = server
            .post("/reviews")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "teacher_id": 2,
                "lesson_request_id": 2,
                "rating": 3
            }))
            .await;

        response.assert_status_conflict();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_review_validation(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        // Rating out of range
        let response = server
            .post("/reviews")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "teacher_id": 2, "rating": 6 }))
            .await;
        response.assert_status_bad_request();

        // Rating missing
        let response = server
            .post("/reviews")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "teacher_id": 2 }))
            .await;
        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_review_as_teacher_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        let response = server
            .post("/reviews")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "teacher_id": 3, "rating": 5 }))
            .await;

        response.assert_status_forbidden();
        Ok(())
    }

    // ============================================================
    // GET /reviews/teacher/{teacher_id} - list_teacher_reviews
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests", "reviews")))]
    async fn test_list_teacher_reviews(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        let response = server
            .get("/reviews/teacher/2")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let reviews: Vec<serde_json::Value> = response.json();
        assert_eq!(reviews.len(), 2);
        // Newest first, with the author attached
        assert_eq!(reviews[0]["student"]["id"], 1);
        assert_eq!(reviews[1]["student"]["name"], "Dan Brown");
        assert_eq!(reviews[1]["rating"], 5);
        Ok(())
    }

    // ============================================================
    // PUT /reviews/{id} - update_review
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests", "reviews")))]
    async fn test_update_own_review(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1); // Alice owns review 2

        let response = server
            .put("/reviews/2")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "rating": 5, "comment": "Even better than I thought" }))
            .await;

        response.assert_status_ok();
        let review: serde_json::Value = response.json();
        assert_eq!(review["rating"], 5);
        assert_eq!(review["comment"], "Even better than I thought");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests", "reviews")))]
    async fn test_update_foreign_review(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1); // Review 1 belongs to Dan

        let response = server
            .put("/reviews/1")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "rating": 1 }))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests", "reviews")))]
    async fn test_update_review_with_no_fields(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        let response = server
            .put("/reviews/2")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({}))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }
}
