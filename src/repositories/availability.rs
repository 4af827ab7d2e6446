//! AvailabilityRepository - teacher calendar slots and weekly ranges

use crate::entities::{AvailabilitySlot, AvailableDay};
use chrono::{NaiveDate, Utc};
use sqlx::{Error, SqlitePool};
use tracing::{debug, instrument};

const SLOT_COLUMNS: &str = "id, teacher_id, date, start_time, end_time, is_available";
const DAY_COLUMNS: &str = "id, teacher_id, day_of_week, start_time, end_time";

pub struct AvailabilityRepository {
    connection_pool: SqlitePool,
}

impl AvailabilityRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Inserts or updates the slot keyed by (teacher, date, start_time).
    #[instrument(skip(self), fields(teacher_id = %teacher_id, date = %date, start_time = %start_time))]
    pub async fn upsert_slot(
        &self,
        teacher_id: &i64,
        date: &NaiveDate,
        start_time: &str,
        end_time: &str,
        is_available: bool,
    ) -> Result<AvailabilitySlot, Error> {
        debug!("Upserting availability slot");
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO teacher_availability \
             (teacher_id, date, start_time, end_time, is_available, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (teacher_id, date, start_time) \
             DO UPDATE SET end_time = excluded.end_time, \
                           is_available = excluded.is_available, \
                           updated_at = excluded.updated_at \
             RETURNING {SLOT_COLUMNS}"
        );
        sqlx::query_as::<_, AvailabilitySlot>(&sql)
            .bind(teacher_id)
            .bind(date)
            .bind(start_time)
            .bind(end_time)
            .bind(is_available)
            .bind(now)
            .bind(now)
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Lists a teacher's slots, optionally bounded by a date range.
    #[instrument(skip(self), fields(teacher_id = %teacher_id))]
    pub async fn find_slots(
        &self,
        teacher_id: &i64,
        start_date: Option<&NaiveDate>,
        end_date: Option<&NaiveDate>,
    ) -> Result<Vec<AvailabilitySlot>, Error> {
        debug!("Listing availability slots");
        let mut sql =
            format!("SELECT {SLOT_COLUMNS} FROM teacher_availability WHERE teacher_id = ?");
        if start_date.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if end_date.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date ASC, start_time ASC");

        let mut query = sqlx::query_as::<_, AvailabilitySlot>(&sql).bind(teacher_id);
        if let Some(start_date) = start_date {
            query = query.bind(start_date);
        }
        if let Some(end_date) = end_date {
            query = query.bind(end_date);
        }
        query.fetch_all(&self.connection_pool).await
    }

    /// Slots on or after `today`, for the public teacher profile.
    #[instrument(skip(self), fields(teacher_id = %teacher_id))]
    pub async fn find_upcoming_slots(
        &self,
        teacher_id: &i64,
        today: &NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>, Error> {
        let sql = format!(
            "SELECT {SLOT_COLUMNS} FROM teacher_availability \
             WHERE teacher_id = ? AND date >= ? \
             ORDER BY date ASC, start_time ASC"
        );
        sqlx::query_as::<_, AvailabilitySlot>(&sql)
            .bind(teacher_id)
            .bind(today)
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Deletes a slot, scoped to its owner. Returns the deleted row count.
    #[instrument(skip(self), fields(slot_id = %id, teacher_id = %teacher_id))]
    pub async fn delete_slot(&self, id: &i64, teacher_id: &i64) -> Result<u64, Error> {
        debug!("Deleting availability slot");
        let result =
            sqlx::query("DELETE FROM teacher_availability WHERE id = ? AND teacher_id = ?")
                .bind(id)
                .bind(teacher_id)
                .execute(&self.connection_pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Inserts or updates the weekly range keyed by (teacher, day_of_week).
    #[instrument(skip(self), fields(teacher_id = %teacher_id, day_of_week = %day_of_week))]
    pub async fn upsert_day(
        &self,
        teacher_id: &i64,
        day_of_week: i64,
        start_time: &str,
        end_time: &str,
    ) -> Result<AvailableDay, Error> {
        debug!("Upserting weekly availability");
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO teacher_available_days \
             (teacher_id, day_of_week, start_time, end_time, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT (teacher_id, day_of_week) \
             DO UPDATE SET start_time = excluded.start_time, \
                           end_time = excluded.end_time, \
                           updated_at = excluded.updated_at \
             RETURNING {DAY_COLUMNS}"
        );
        sqlx::query_as::<_, AvailableDay>(&sql)
            .bind(teacher_id)
            .bind(day_of_week)
            .bind(start_time)
            .bind(end_time)
            .bind(now)
            .bind(now)
            .fetch_one(&self.connection_pool)
            .await
    }

    #[instrument(skip(self), fields(teacher_id = %teacher_id))]
    pub async fn find_days(&self, teacher_id: &i64) -> Result<Vec<AvailableDay>, Error> {
        let sql = format!(
            "SELECT {DAY_COLUMNS} FROM teacher_available_days \
             WHERE teacher_id = ? \
             ORDER BY day_of_week ASC"
        );
        sqlx::query_as::<_, AvailableDay>(&sql)
            .bind(teacher_id)
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Deletes a weekly range, scoped to its owner.
    #[instrument(skip(self), fields(day_id = %id, teacher_id = %teacher_id))]
    pub async fn delete_day(&self, id: &i64, teacher_id: &i64) -> Result<u64, Error> {
        debug!("Deleting weekly availability");
        let result =
            sqlx::query("DELETE FROM teacher_available_days WHERE id = ? AND teacher_id = ?")
                .bind(id)
                .bind(teacher_id)
                .execute(&self.connection_pool)
                .await?;
        Ok(result.rows_affected())
    }
}
