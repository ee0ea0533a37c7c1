use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::Validate;

/// Singleton row (id = 1) holding the shop identity shown by the UI.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ShopSettings {
    pub id: i32,
    pub name: String,
    pub logo_url: Option<String>,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShopSettings {
    #[validate(length(min = 1, message = "Shop name cannot be empty"))]
    pub name: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}
