// libs/appointment-cell/src/handlers.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::schema::{Appointment, NewAppointment};

use crate::models::{
    AppointmentWithDetails, AvailabilityResponse, BookingError, UpdateStatusRequest,
};
use crate::services::booking::BookingService;
use crate::services::calendar::CalendarService;
use crate::services::slots::SlotResolver;

fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    date.parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid date: {date}")))
}

fn check_doctor_id(doctor_id: i64) -> Result<(), AppError> {
    if doctor_id <= 0 {
        return Err(AppError::InvalidInput(format!(
            "Invalid doctor ID: {doctor_id}"
        )));
    }
    Ok(())
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SlotNotAvailable => AppError::SlotNotAvailable(err.to_string()),
            BookingError::SlotAlreadyBooked => AppError::SlotAlreadyBooked(err.to_string()),
            BookingError::NotFound(_) => AppError::NotFound(err.to_string()),
            BookingError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}

/// GET /api/availability/{doctor_id}/{date}
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, date)): Path<(i64, String)>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    check_doctor_id(doctor_id)?;
    let date = parse_date(&date)?;

    let resolver = SlotResolver::new(state);
    let time_slots = resolver.resolve_open_slots(doctor_id, date).await;

    Ok(Json(AvailabilityResponse { time_slots }))
}

/// POST /api/appointments
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let booking_service = BookingService::new(state);
    let appointment = booking_service.book_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/appointments
#[axum::debug_handler]
pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    Ok(Json(state.store.get_appointments().await))
}

/// GET /api/appointments/user/{user_id}
#[axum::debug_handler]
pub async fn get_user_appointments(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<AppointmentWithDetails>>, AppError> {
    if user_id <= 0 {
        return Err(AppError::InvalidInput(format!("Invalid user ID: {user_id}")));
    }

    let appointments = state.store.appointments_by_user(user_id).await;
    let mut enriched = Vec::with_capacity(appointments.len());
    for appointment in appointments {
        let doctor = state.store.get_doctor(appointment.doctor_id).await;
        let specialty = state.store.get_specialty(appointment.specialty_id).await;
        enriched.push(AppointmentWithDetails {
            appointment,
            doctor_name: doctor.map(|d| d.name),
            specialty_name: specialty.map(|s| s.name),
        });
    }

    Ok(Json(enriched))
}

/// GET /api/appointments/doctor/{doctor_id}
#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    check_doctor_id(doctor_id)?;
    Ok(Json(state.store.appointments_by_doctor(doctor_id).await))
}

/// PATCH /api/appointments/{id}/status
#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let booking_service = BookingService::new(state);
    let updated = booking_service
        .update_status(id, request.status, request.notes)
        .await?;

    Ok(Json(updated))
}

/// GET /api/calendar/{doctor_id}/{year}/{month}
#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, year, month)): Path<(i64, i32, u32)>,
) -> Result<Json<BTreeMap<u32, bool>>, AppError> {
    let calendar = CalendarService::new(state);
    let days = calendar.month_availability(doctor_id, year, month).await?;
    Ok(Json(days))
}
