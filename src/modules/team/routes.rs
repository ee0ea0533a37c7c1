use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{list_clients, list_professionals, update_member};
use crate::app_state::AppState;

pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/team", get(list_professionals))
        .route("/team/{id}", patch(update_member))
        .route("/clients", get(list_clients))
}
