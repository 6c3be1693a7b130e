// libs/doctor-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/specialties", get(handlers::get_specialties))
        .route("/doctors", get(handlers::get_doctors))
        .route("/doctors/specialty/{specialty_id}", get(handlers::get_doctors_by_specialty))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .route("/doctors/{doctor_id}/availability", get(handlers::get_doctor_schedule))
        .route("/availability", post(handlers::create_availability))
        .route("/availability/{doctor_id}/{date}", put(handlers::update_availability))
        .with_state(state)
}
