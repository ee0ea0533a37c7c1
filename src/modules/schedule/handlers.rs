use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{UpsertWorkingHours, WorkingHoursRepository, WorkingHoursRule};
use crate::error::{AppError, AppResult};
use crate::identity::CurrentUser;

pub async fn list_working_hours(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<WorkingHoursRule>>> {
    let rules = WorkingHoursRepository::list(&state.db).await?;
    Ok(Json(rules))
}

/// One rule per weekday (0 = Sunday .. 6 = Saturday). Saving a closed rule
/// keeps the day out of availability regardless of its hours.
pub async fn upsert_working_hours(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(day): Path<i16>,
    Json(payload): Json<UpsertWorkingHours>,
) -> AppResult<Json<WorkingHoursRule>> {
    user.require_admin()?;

    if !(0..=6).contains(&day) {
        return Err(AppError::Validation(
            "Weekday must be between 0 (Sunday) and 6 (Saturday)".into(),
        ));
    }
    payload.validate()?;

    let rule = WorkingHoursRepository::upsert(&state.db, day, &payload).await?;
    Ok(Json(rule))
}
