use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// CORE ENTITIES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub social_security_id: String,
    pub role: UserRole,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Patient,
    Doctor,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Patient => write!(f, "patient"),
            UserRole::Doctor => write!(f, "doctor"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub specialty_id: i64,
    pub is_available: bool,
    pub license_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub specialty_id: i64,
    pub date: NaiveDate,
    /// Slot time in HH:MM form, matching the declared availability slots.
    pub time: String,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
    Attended,
    #[serde(rename = "no-show")]
    NoShow,
}

impl AppointmentStatus {
    /// A non-cancelled appointment keeps its slot out of the open set.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Attended => write!(f, "attended"),
            AppointmentStatus::NoShow => write!(f, "no-show"),
        }
    }
}

/// One record per (doctor_id, date) pair. Declared slot order is preserved
/// everywhere downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time_slots: Vec<String>,
    pub is_holiday: bool,
    pub blocked_hours: Vec<String>,
}

// ==============================================================================
// INSERT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub social_security_id: String,
    pub role: UserRole,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpecialty {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub user_id: i64,
    pub name: String,
    pub specialty_id: i64,
    pub is_available: Option<bool>,
    pub license_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub user_id: i64,
    pub doctor_id: i64,
    pub specialty_id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub reason: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAvailability {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time_slots: Vec<String>,
    pub is_holiday: Option<bool>,
    pub blocked_hours: Option<Vec<String>>,
}

/// Validate an HH:MM slot time string.
pub fn is_valid_slot_time(time: &str) -> bool {
    time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_time_validation_accepts_hh_mm() {
        assert!(is_valid_slot_time("08:00"));
        assert!(is_valid_slot_time("16:30"));
        assert!(is_valid_slot_time("23:59"));
    }

    #[test]
    fn slot_time_validation_rejects_malformed_input() {
        assert!(!is_valid_slot_time("8:00"));
        assert!(!is_valid_slot_time("25:00"));
        assert!(!is_valid_slot_time("08:60"));
        assert!(!is_valid_slot_time("08:00:00"));
        assert!(!is_valid_slot_time("morning"));
    }

    #[test]
    fn appointment_status_wire_names_match_legacy_api() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::NoShow).unwrap(),
            "\"no-show\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        let parsed: AppointmentStatus = serde_json::from_str("\"attended\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Attended);
    }

    #[test]
    fn unknown_status_values_fail_to_deserialize() {
        assert!(serde_json::from_str::<AppointmentStatus>("\"postponed\"").is_err());
        assert!(serde_json::from_str::<AppointmentStatus>("\"noshow\"").is_err());
        // wire names are lowercase; other casings are not accepted
        assert!(serde_json::from_str::<AppointmentStatus>("\"Confirmed\"").is_err());
    }

    #[test]
    fn cancelled_is_the_only_status_that_frees_a_slot() {
        assert!(AppointmentStatus::Confirmed.occupies_slot());
        assert!(AppointmentStatus::Pending.occupies_slot());
        assert!(AppointmentStatus::Attended.occupies_slot());
        assert!(AppointmentStatus::NoShow.occupies_slot());
        assert!(!AppointmentStatus::Cancelled.occupies_slot());
    }
}
