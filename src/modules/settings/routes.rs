use axum::{routing::get, Router};

use super::handlers::{get_settings, update_settings};
use crate::app_state::AppState;

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
