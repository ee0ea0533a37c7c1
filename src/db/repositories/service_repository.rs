use sqlx::types::Uuid;
use sqlx::PgPool;

use crate::db::error::DatabaseError;
use crate::db::models::{NewService, Service, UpdateService};

pub struct ServiceRepository;

impl ServiceRepository {
    /// Customers only ever see active services; staff screens pass
    /// `include_inactive` to manage retired ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Service>, DatabaseError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, name, price, duration_minutes, image_url, active, created_at, updated_at
            FROM services
            WHERE active OR $1
            ORDER BY name
            "#,
        )
        .bind(include_inactive)
        .fetch_all(pool)
        .await?;

        Ok(services)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Service, DatabaseError> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT id, name, price, duration_minutes, image_url, active, created_at, updated_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    pub async fn create(pool: &PgPool, payload: &NewService) -> Result<Service, DatabaseError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (name, price, duration_minutes, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, duration_minutes, image_url, active, created_at, updated_at
            "#,
        )
        .bind(&payload.name)
        .bind(payload.price)
        .bind(payload.duration_minutes)
        .bind(&payload.image_url)
        .fetch_one(pool)
        .await?;

        Ok(service)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        payload: &UpdateService,
    ) -> Result<Service, DatabaseError> {
        sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                duration_minutes = COALESCE($4, duration_minutes),
                image_url = COALESCE($5, image_url),
                active = COALESCE($6, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, duration_minutes, image_url, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(payload.price)
        .bind(payload.duration_minutes)
        .bind(&payload.image_url)
        .bind(payload.active)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }
}
