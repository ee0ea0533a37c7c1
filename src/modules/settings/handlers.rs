use axum::{extract::State, Json};
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{SettingsRepository, ShopSettings, UpdateShopSettings};
use crate::error::AppResult;
use crate::identity::CurrentUser;

/// Public: the landing page shows the shop name and logo before login.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<ShopSettings>> {
    let settings = SettingsRepository::get(&state.db).await?;
    Ok(Json(settings))
}

/// The logo file itself lives in external storage; this stores the public
/// URL the upload produced.
pub async fn update_settings(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateShopSettings>,
) -> AppResult<Json<ShopSettings>> {
    user.require_admin()?;
    payload.validate()?;

    let settings = SettingsRepository::update(&state.db, &payload).await?;
    Ok(Json(settings))
}
