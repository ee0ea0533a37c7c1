use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    cancel_booking, create_booking, day_availability, list_bookings, reschedule_booking,
};
use crate::app_state::AppState;

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings/availability", get(day_availability))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", patch(reschedule_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
}
