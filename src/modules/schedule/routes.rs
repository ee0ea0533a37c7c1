use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{list_working_hours, upsert_working_hours};
use crate::app_state::AppState;

pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/working-hours", get(list_working_hours))
        .route("/working-hours/{day}", put(upsert_working_hours))
}
