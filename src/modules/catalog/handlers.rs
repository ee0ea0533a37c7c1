use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::types::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{NewService, Service, ServiceRepository, UpdateService};
use crate::error::AppResult;
use crate::identity::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct ListServicesQuery {
    /// Staff screens pass `all=true` to manage retired services.
    #[serde(default)]
    pub all: bool,
}

pub async fn list_services(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListServicesQuery>,
) -> AppResult<Json<Vec<Service>>> {
    let include_inactive = query.all && user.0.role.is_staff();
    let services = ServiceRepository::list(&state.db, include_inactive).await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<NewService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    user.require_admin()?;
    payload.validate()?;

    let service = ServiceRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateService>,
) -> AppResult<Json<Service>> {
    user.require_admin()?;
    payload.validate()?;

    let service = ServiceRepository::update(&state.db, id, &payload).await?;
    Ok(Json(service))
}
