use sqlx::PgPool;

use crate::db::error::DatabaseError;
use crate::db::models::{UpsertWorkingHours, WorkingHoursRule};

pub struct WorkingHoursRepository;

impl WorkingHoursRepository {
    /// All configured weekday rules, at most seven. Weekdays with no row are
    /// closed as far as the availability engine is concerned.
    pub async fn list(pool: &PgPool) -> Result<Vec<WorkingHoursRule>, DatabaseError> {
        let rules = sqlx::query_as::<_, WorkingHoursRule>(
            r#"
            SELECT day_of_week, opens_at, closes_at, is_closed, updated_at
            FROM working_hours
            ORDER BY day_of_week
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rules)
    }

    pub async fn upsert(
        pool: &PgPool,
        day_of_week: i16,
        payload: &UpsertWorkingHours,
    ) -> Result<WorkingHoursRule, DatabaseError> {
        let rule = sqlx::query_as::<_, WorkingHoursRule>(
            r#"
            INSERT INTO working_hours (day_of_week, opens_at, closes_at, is_closed)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (day_of_week) DO UPDATE
            SET opens_at = EXCLUDED.opens_at,
                closes_at = EXCLUDED.closes_at,
                is_closed = EXCLUDED.is_closed,
                updated_at = NOW()
            RETURNING day_of_week, opens_at, closes_at, is_closed, updated_at
            "#,
        )
        .bind(day_of_week)
        .bind(payload.opens_at)
        .bind(payload.closes_at)
        .bind(payload.is_closed)
        .fetch_one(pool)
        .await?;

        Ok(rule)
    }
}
