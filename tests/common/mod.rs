use axum_test::TestServer;
use sqlx::SqlitePool;
use std::sync::Arc;
use tutorlink::core::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-not-for-production";

/// Creates an AppState wired to the test pool and the test JWT secret.
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string()))
}

/// Creates a TestServer running the full router.
pub fn create_test_server(pool: SqlitePool) -> TestServer {
    let app = tutorlink::create_router(create_test_state(pool));
    TestServer::new(app).expect("Failed to create test server")
}

/// Generates a JWT valid for 24 hours, signed with the test secret.
pub fn create_test_jwt(user_id: i64) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        id: i64,
        exp: usize,
        iat: usize,
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id,
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to create JWT token")
}
