// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_models::schema::{Appointment, AppointmentStatus};

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Wire shape of `GET /api/availability/{doctor_id}/{date}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub time_slots: Vec<String>,
}

/// Appointment enriched with doctor and specialty names for patient listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentWithDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor_name: Option<String>,
    pub specialty_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Selected time slot is not available")]
    SlotNotAvailable,

    #[error("Selected time slot is already booked")]
    SlotAlreadyBooked,

    #[error("Invalid appointment data: {0}")]
    InvalidInput(String),

    #[error("Appointment {0} not found")]
    NotFound(i64),
}
