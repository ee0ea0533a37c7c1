//! The authenticated principal, passed explicitly to every handler that needs
//! it. Session handling lives in the upstream auth layer, which forwards the
//! verified subject id in a header; there is no ambient current-user state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{DatabaseError, Profile, ProfileRepository};
use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct CurrentUser(pub Profile);

impl CurrentUser {
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.0.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::Authorization("Staff access required".into()))
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if matches!(self.0.role, crate::db::ProfileRole::Admin) {
            Ok(())
        } else {
            Err(AppError::Authorization("Admin access required".into()))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing user identity".into()))?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| AppError::Authentication("Malformed user identity".into()))?;

        let profile = ProfileRepository::get(&state.db, user_id)
            .await
            .map_err(|err| match err {
                DatabaseError::NotFound => {
                    AppError::Authentication("Unknown user identity".into())
                }
                other => AppError::Database(other),
            })?;

        Ok(CurrentUser(profile))
    }
}
