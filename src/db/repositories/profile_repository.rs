use sqlx::types::Uuid;
use sqlx::PgPool;

use crate::db::error::DatabaseError;
use crate::db::models::{NewProfile, Profile, ProfileRole, UpdateProfile};

pub struct ProfileRepository;

impl ProfileRepository {
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Profile, DatabaseError> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, email, phone, avatar_url, role, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    /// Bookable team members: barbers and admins alike take appointments.
    pub async fn list_professionals(pool: &PgPool) -> Result<Vec<Profile>, DatabaseError> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, email, phone, avatar_url, role, created_at, updated_at
            FROM profiles
            WHERE role IN ('barber', 'admin')
            ORDER BY full_name
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }

    pub async fn list_customers(pool: &PgPool) -> Result<Vec<Profile>, DatabaseError> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, email, phone, avatar_url, role, created_at, updated_at
            FROM profiles
            WHERE role = 'customer'
            ORDER BY full_name
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }

    /// Registers the profile for an externally-authenticated subject. The id
    /// comes from the auth provider, so a duplicate means a replayed signup.
    pub async fn create(pool: &PgPool, payload: &NewProfile) -> Result<Profile, DatabaseError> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, full_name, email, phone, avatar_url, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, full_name, email, phone, avatar_url, role, created_at, updated_at
            "#,
        )
        .bind(payload.id)
        .bind(&payload.full_name)
        .bind(payload.email.to_lowercase())
        .bind(&payload.phone)
        .bind(&payload.avatar_url)
        .bind(payload.role)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::Duplicate)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        payload: &UpdateProfile,
    ) -> Result<Profile, DatabaseError> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                avatar_url = COALESCE($4, avatar_url),
                role = COALESCE($5, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, email, phone, avatar_url, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.full_name)
        .bind(&payload.phone)
        .bind(&payload.avatar_url)
        .bind(payload.role)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }
}
