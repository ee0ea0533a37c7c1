use axum::{routing::get, Router};

use super::handlers::{complete_registration, get_profile, update_profile};
use crate::app_state::AppState;

pub fn account_routes() -> Router<AppState> {
    Router::new().route(
        "/account",
        get(get_profile)
            .post(complete_registration)
            .patch(update_profile),
    )
}
