// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::schema::{Availability, Doctor, NewAvailability, Specialty};

use crate::models::{ScheduleError, UpdateAvailabilityRequest};
use crate::services::availability::AvailabilityService;
use crate::services::directory::DirectoryService;

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::DoctorNotFound | ScheduleError::AvailabilityNotFound => {
                AppError::NotFound(err.to_string())
            }
            ScheduleError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    date.parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid date: {date}")))
}

/// GET /api/specialties
#[axum::debug_handler]
pub async fn get_specialties(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Specialty>>, AppError> {
    Ok(Json(DirectoryService::new(state).list_specialties().await))
}

/// GET /api/doctors
#[axum::debug_handler]
pub async fn get_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    Ok(Json(DirectoryService::new(state).list_doctors().await))
}

/// GET /api/doctors/{doctor_id}
#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = DirectoryService::new(state).get_doctor(doctor_id).await?;
    Ok(Json(doctor))
}

/// GET /api/doctors/specialty/{specialty_id}
#[axum::debug_handler]
pub async fn get_doctors_by_specialty(
    State(state): State<Arc<AppState>>,
    Path(specialty_id): Path<i64>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    if specialty_id <= 0 {
        return Err(AppError::InvalidInput(format!(
            "Invalid specialty ID: {specialty_id}"
        )));
    }
    let doctors = DirectoryService::new(state)
        .doctors_by_specialty(specialty_id)
        .await;
    Ok(Json(doctors))
}

/// GET /api/doctors/{doctor_id}/availability
#[axum::debug_handler]
pub async fn get_doctor_schedule(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Vec<Availability>>, AppError> {
    let schedule = AvailabilityService::new(state)
        .doctor_schedule(doctor_id)
        .await?;
    Ok(Json(schedule))
}

/// POST /api/availability
#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewAvailability>,
) -> Result<(StatusCode, Json<Availability>), AppError> {
    let availability = AvailabilityService::new(state).declare_day(request).await?;
    Ok((StatusCode::CREATED, Json(availability)))
}

/// PUT /api/availability/{doctor_id}/{date}
#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, date)): Path<(i64, String)>,
    Json(request): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Availability>, AppError> {
    let date = parse_date(&date)?;
    let updated = AvailabilityService::new(state)
        .update_day(doctor_id, date, request)
        .await?;
    Ok(Json(updated))
}
