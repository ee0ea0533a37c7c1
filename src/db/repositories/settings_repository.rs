use sqlx::PgPool;

use crate::db::error::DatabaseError;
use crate::db::models::{ShopSettings, UpdateShopSettings};

pub struct SettingsRepository;

impl SettingsRepository {
    /// The settings row is seeded by the initial migration, so a miss here is
    /// a broken deployment rather than an empty table.
    pub async fn get(pool: &PgPool) -> Result<ShopSettings, DatabaseError> {
        sqlx::query_as::<_, ShopSettings>(
            "SELECT id, name, logo_url, updated_at FROM shop_settings WHERE id = 1",
        )
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    pub async fn update(
        pool: &PgPool,
        payload: &UpdateShopSettings,
    ) -> Result<ShopSettings, DatabaseError> {
        sqlx::query_as::<_, ShopSettings>(
            r#"
            UPDATE shop_settings
            SET
                name = COALESCE($1, name),
                logo_url = COALESCE($2, logo_url),
                updated_at = NOW()
            WHERE id = 1
            RETURNING id, name, logo_url, updated_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.logo_url)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }
}
