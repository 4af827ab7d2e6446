//! Integration tests for the notification endpoints

mod common;

#[cfg(test)]
mod notification_tests {
    use super::common::{create_test_jwt, create_test_server};
    use axum_test::http::HeaderName;
    use sqlx::SqlitePool;

    // ============================================================
    // GET /notifications - list_notifications
    // ============================================================

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("users", "requests", "chats", "notifications")
    ))]
    async fn test_list_notifications(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2); // Bob owns notifications 1 and 3

        let response = server
            .get("/notifications")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let notifications: Vec<serde_json::Value> = response.json();
        assert_eq!(notifications.len(), 2);
        // Newest first
        assert_eq!(notifications[0]["id"], 1);
        assert_eq!(notifications[0]["type"], "lesson_request");
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("users", "requests", "chats", "notifications")
    ))]
    async fn test_list_notifications_filtered_and_limited(
        pool: SqlitePool,
    ) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        let unread_response = server
            .get("/notifications?is_read=false")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;
        let unread: Vec<serde_json::Value> = unread_response.json();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0]["id"], 1);

        let limited_response = server
            .get("/notifications?limit=1")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;
        let limited: Vec<serde_json::Value> = limited_response.json();
        assert_eq!(limited.len(), 1);
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("users", "requests", "chats", "notifications")
    ))]
    async fn test_list_notifications_ignores_non_positive_limit(
        pool: SqlitePool,
    ) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        // SQLite reads a negative LIMIT as unbounded; both are treated as
        // "no limit" and the ordering stays intact
        for limit in ["-1", "0"] {
            let response = server
                .get(&format!("/notifications?limit={}", limit))
                .add_header(
                    HeaderName::from_static("authorization"),
                    format!("Bearer {}", token),
                )
                .await;

            response.assert_status_ok();
            let notifications: Vec<serde_json::Value> = response.json();
            assert_eq!(notifications.len(), 2);
            assert_eq!(notifications[0]["id"], 1);
        }
        Ok(())
    }

    // ============================================================
    // GET /notifications/unread-count
    // ============================================================

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("users", "requests", "chats", "notifications")
    ))]
    async fn test_unread_count(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        let response = server
            .get("/notifications/unread-count")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["count"], 1);
        Ok(())
    }

    // ============================================================
    // PUT /notifications/{id}/read - mark_notification_read
    // ============================================================

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("users", "requests", "chats", "notifications")
    ))]
    async fn test_mark_notification_read(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        let response = server
            .put("/notifications/1/read")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
        let notification: serde_json::Value = response.json();
        assert_eq!(notification["is_read"], true);

        let count_response = server
            .get("/notifications/unread-count")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;
        let body: serde_json::Value = count_response.json();
        assert_eq!(body["count"], 0);
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("users", "requests", "chats", "notifications")
    ))]
    async fn test_mark_foreign_notification_read(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(4); // notification 1 belongs to Bob

        let response = server
            .put("/notifications/1/read")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    // ============================================================
    // PUT /notifications/read-all - mark_all_notifications_read
    // ============================================================

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("users", "requests", "chats", "notifications")
    ))]
    async fn test_mark_all_notifications_read(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let token = create_test_jwt(2);

        let response = server
            .put("/notifications/read-all")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();

        let list_response = server
            .get("/notifications?is_read=false")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;
        let unread: Vec<serde_json::Value> = list_response.json();
        assert!(unread.is_empty());
        Ok(())
    }
}
