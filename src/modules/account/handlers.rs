use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{NewProfile, Profile, ProfileRepository, ProfileRole, UpdateProfile};
use crate::error::{AppError, AppResult};
use crate::identity::{CurrentUser, USER_ID_HEADER};

pub async fn get_profile(user: CurrentUser) -> Json<Profile> {
    Json(user.0)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompleteRegistration {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// First login lands here: the auth provider has already verified the
/// subject, but no profile row exists yet, so this cannot go through the
/// `CurrentUser` extractor. Self-registration is always a customer; staff
/// roles are granted afterwards through the team roster.
pub async fn complete_registration(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CompleteRegistration>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing user identity".into()))?;
    let user_id = Uuid::parse_str(raw)
        .map_err(|_| AppError::Authentication("Malformed user identity".into()))?;

    payload.validate()?;

    let profile = ProfileRepository::create(
        &state.db,
        &NewProfile {
            id: user_id,
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            avatar_url: payload.avatar_url,
            role: ProfileRole::Customer,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    payload.validate()?;
    // Nobody grants themselves a role; promotions go through the roster.
    if payload.role.is_some() {
        return Err(AppError::Authorization(
            "Role changes go through team management".into(),
        ));
    }

    let profile = ProfileRepository::update(&state.db, user.0.id, &payload).await?;
    Ok(Json(profile))
}
