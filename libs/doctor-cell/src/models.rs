// libs/doctor-cell/src/models.rs
use serde::{Deserialize, Serialize};

/// Body of `PUT /api/availability/{doctor_id}/{date}`. Replaces the declared
/// slots; holiday flag and blocked hours are only touched when supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    pub time_slots: Vec<String>,
    pub blocked_hours: Option<Vec<String>>,
    pub is_holiday: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Availability not found for this doctor and date")]
    AvailabilityNotFound,

    #[error("Invalid schedule data: {0}")]
    InvalidInput(String),
}
