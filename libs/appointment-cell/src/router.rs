// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/availability/{doctor_id}/{date}", get(handlers::get_availability))
        .route(
            "/appointments",
            post(handlers::book_appointment).get(handlers::get_appointments),
        )
        .route("/appointments/user/{user_id}", get(handlers::get_user_appointments))
        .route("/appointments/doctor/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/appointments/{id}/status", patch(handlers::update_appointment_status))
        .route("/calendar/{doctor_id}/{year}/{month}", get(handlers::get_calendar))
        .with_state(state)
}
