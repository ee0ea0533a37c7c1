use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use sqlx::types::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{Profile, ProfileRepository, UpdateProfile};
use crate::error::AppResult;
use crate::identity::CurrentUser;

/// What the booking screen needs to render a professional card; contact
/// details stay staff-only.
#[derive(Debug, Serialize)]
pub struct ProfessionalCard {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl From<Profile> for ProfessionalCard {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
        }
    }
}

pub async fn list_professionals(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<ProfessionalCard>>> {
    let professionals = ProfileRepository::list_professionals(&state.db).await?;
    Ok(Json(
        professionals.into_iter().map(ProfessionalCard::from).collect(),
    ))
}

pub async fn list_clients(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Profile>>> {
    user.require_staff()?;
    let clients = ProfileRepository::list_customers(&state.db).await?;
    Ok(Json(clients))
}

/// Roster management: promoting a customer to barber, demoting, fixing a
/// display name. Admin only.
pub async fn update_member(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    user.require_admin()?;
    payload.validate()?;

    let profile = ProfileRepository::update(&state.db, id, &payload).await?;
    Ok(Json(profile))
}
