//! UserRepository - read access to user profiles

use super::Read;
use crate::entities::{USER_COLUMNS, User};
use sqlx::{Error, SqlitePool};
use tracing::{debug, instrument};

pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Reads a user only if it exists and has the teacher role.
    #[instrument(skip(self), fields(teacher_id = %id))]
    pub async fn find_teacher(&self, id: &i64) -> Result<Option<User>, Error> {
        debug!("Reading teacher by id");
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? AND role = 'teacher'");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Read<User, i64> for UserRepository {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        debug!("Reading user by id");
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}
