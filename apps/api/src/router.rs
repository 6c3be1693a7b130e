use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = doctor_routes(state.clone()).merge(appointment_routes(state));

    Router::new()
        .route("/", get(|| async { "MedNova scheduling API is running!" }))
        .nest("/api", api)
}
