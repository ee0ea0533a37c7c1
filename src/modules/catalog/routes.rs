use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{create_service, list_services, update_service};
use crate::app_state::AppState;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route("/services/{id}", patch(update_service))
}
