//! Integration tests for the lesson request endpoints

mod common;

#[cfg(test)]
mod request_tests {
    use super::common::{create_test_jwt, create_test_server};
    use axum_test::http::HeaderName;
    use serde_json::json;
    use sqlx::SqlitePool;

    // ============================================================
    // POST /requests - create_lesson_request
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_request_success(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1); // Alice, student

        let response = server
            .post("/requests")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "teacher_id": 2,
                "requested_date": "2030-03-01",
                "requested_time": "14:00",
                "message": "Need help with algebra"
            }))
            .await;

        response.assert_status(axum_test::http::StatusCode::CREATED);
        let request: serde_json::Value = response.json();
        assert_eq!(request["status"], "pending");
        assert_eq!(request["student_id"], 1);
        assert_eq!(request["teacher_id"], 2);
        assert_eq!(request["requested_time"], "14:00");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_request_notifies_teacher(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let student_token = create_test_jwt(1);
        let teacher_token = create_test_jwt(2);

        server
            .post("/requests")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", student_token),
            )
            .json(&json!({ "teacher_id": 2 }))
            .await
            .assert_status(axum_test::http::StatusCode::CREATED);

        let response = server
            .get("/notifications")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", teacher_token),
            )
            .await;

        response.assert_status_ok();
        let notifications: Vec<serde_json::Value> = response.json();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["type"], "lesson_request");
        assert_eq!(notifications[0]["is_read"], false);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_request_as_teacher_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2); // Bob, teacher

        let response = server
            .post("/requests")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "teacher_id": 3 }))
            .await;

        response.assert_status_forbidden();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_request_missing_teacher_id(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        let response = server
            .post("/requests")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "message": "no teacher" }))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_request_invalid_time(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        let response = server
            .post("/requests")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "teacher_id": 2, "requested_time": "25:99" }))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_request_unknown_teacher(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        // id 1 is Alice herself, a student; id 999 does not exist
        for teacher_id in [1, 999] {
            let response = server
                .post("/requests")
                .add_header(
                    HeaderName::from_static("authorization"),
                    format!("Bearer {}", token),
                )
                .json(&json!({ "teacher_id": teacher_id }))
                .await;
            response.assert_status_not_found();
        }
        Ok(())
    }

    // ============================================================
    // GET /requests - list_lesson_requests
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_list_requests_as_student(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1); // Alice sent requests 1 and 3

        let response = server
            .get("/requests")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let requests: Vec<serde_json::Value> = response.json();
        assert_eq!(requests.len(), 2);
        // Newest first: request 3 was created after request 1
        assert_eq!(requests[0]["id"], 3);
        // Counterpart of a student is the teacher
        assert_eq!(requests[0]["counterpart"]["id"], 3);
        assert_eq!(requests[1]["counterpart"]["name"], "Bob Keller");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_list_requests_as_teacher_with_status_filter(
        pool: SqlitePool,
    ) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2); // Bob received requests 1 and 2

        let response = server
            .get("/requests?status=pending")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let requests: Vec<serde_json::Value> = response.json();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["id"], 1);
        // Counterpart of a teacher is the student
        assert_eq!(requests[0]["counterpart"]["id"], 1);
        Ok(())
    }

    // ============================================================
    // GET /requests/{id} - get_lesson_request
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_get_request_detail(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        let response = server
            .get("/requests/1")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let request: serde_json::Value = response.json();
        assert_eq!(request["student"]["id"], 1);
        assert_eq!(request["teacher"]["id"], 2);
        assert_eq!(request["message"], "Need help with calculus");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_get_request_hidden_from_outsiders(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(5); // Eve is not a party of request 1

        let response = server
            .get("/requests/1")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    // ============================================================
    // PUT /requests/{id}/status - update_request_status
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_confirm_request_provisions_chat(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let teacher_token = create_test_jwt(2);
        let student_token = create_test_jwt(1);

        let response = server
            .put("/requests/1/status")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", teacher_token),
            )
            .json(&json!({ "status": "confirmed" }))
            .await;

        response.assert_status_ok();
        let request: serde_json::Value = response.json();
        assert_eq!(request["status"], "confirmed");

        // The student now sees exactly one chat, with no unread messages
        let chats_response = server
            .get("/chats")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", student_token),
            )
            .await;
        chats_response.assert_status_ok();
        let chats: Vec<serde_json::Value> = chats_response.json();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0]["lesson_request_id"], 1);
        assert_eq!(chats[0]["unread_count"], 0);
        assert_eq!(chats[0]["counterpart"]["id"], 2);

        // The student was notified
        let notifications_response = server
            .get("/notifications")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", student_token),
            )
            .await;
        let notifications: Vec<serde_json::Value> = notifications_response.json();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["type"], "lesson_confirmed");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_reject_request_creates_no_chat(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let teacher_token = create_test_jwt(2);
        let student_token = create_test_jwt(1);

        let response = server
            .put("/requests/1/status")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", teacher_token),
            )
            .json(&json!({ "status": "rejected" }))
            .await;

        response.assert_status_ok();
        let request: serde_json::Value = response.json();
        assert_eq!(request["status"], "rejected");

        let chats_response = server
            .get("/chats")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", student_token),
            )
            .await;
        let chats: Vec<serde_json::Value> = chats_response.json();
        assert!(chats.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_decide_request_twice_conflicts(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        server
            .put("/requests/1/status")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "status": "confirmed" }))
            .await
            .assert_status_ok();

        // The request already left the pending state
        let response = server
            .put("/requests/1/status")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "status": "rejected" }))
            .await;

        response.assert_status_conflict();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_decide_request_invalid_status(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        for status in ["pending", "cancelled", "done"] {
            let response = server
                .put("/requests/1/status")
                .add_header(
                    HeaderName::from_static("authorization"),
                    format!("Bearer {}", token),
                )
                .json(&json!({ "status": status }))
                .await;
            response.assert_status_bad_request();
        }
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_decide_request_of_another_teacher(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(3); // Carol is not the teacher of request 1

        let response = server
            .put("/requests/1/status")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "status": "confirmed" }))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_decide_request_as_student_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        let response = server
            .put("/requests/1/status")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "status": "confirmed" }))
            .await;

        response.assert_status_forbidden();
        Ok(())
    }

    // ============================================================
    // PUT /requests/{id}/cancel - cancel_lesson_request
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_cancel_request_success(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        let response = server
            .put("/requests/1/cancel")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let request: serde_json::Value = response.json();
        assert_eq!(request["status"], "cancelled");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_cancel_decided_request_conflicts(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(1);

        // Request 3 was already rejected by Carol
        let response = server
            .put("/requests/3/cancel")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_conflict();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_cancel_request_as_teacher_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        let response = server
            .put("/requests/1/cancel")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_forbidden();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "requests")))]
    async fn test_requests_require_token(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server.get("/requests").await;
        response.assert_status_forbidden();
        Ok(())
    }
}
