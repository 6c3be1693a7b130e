// libs/doctor-cell/src/services/availability.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use shared_database::AppState;
use shared_models::schema::{is_valid_slot_time, Availability, NewAvailability};

use crate::models::{ScheduleError, UpdateAvailabilityRequest};

/// Administration of a doctor's per-day schedules. The resolver side only
/// ever reads these records.
pub struct AvailabilityService {
    state: Arc<AppState>,
}

impl AvailabilityService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Declare (or replace) the schedule for one (doctor, date).
    pub async fn declare_day(
        &self,
        request: NewAvailability,
    ) -> Result<Availability, ScheduleError> {
        self.validate_slots(&request.time_slots)?;
        if let Some(blocked) = &request.blocked_hours {
            self.validate_slots(blocked)?;
        }
        if self.state.store.get_doctor(request.doctor_id).await.is_none() {
            return Err(ScheduleError::DoctorNotFound);
        }

        let availability = self.state.store.create_availability(request).await;
        info!(
            "Declared {} slots for doctor {} on {}",
            availability.time_slots.len(),
            availability.doctor_id,
            availability.date
        );
        Ok(availability)
    }

    pub async fn update_day(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        request: UpdateAvailabilityRequest,
    ) -> Result<Availability, ScheduleError> {
        self.validate_slots(&request.time_slots)?;
        if let Some(blocked) = &request.blocked_hours {
            self.validate_slots(blocked)?;
        }

        let updated = self
            .state
            .store
            .update_availability(
                doctor_id,
                date,
                request.time_slots,
                request.blocked_hours,
                request.is_holiday,
            )
            .await
            .ok_or(ScheduleError::AvailabilityNotFound)?;

        debug!("Updated schedule for doctor {} on {}", doctor_id, date);
        Ok(updated)
    }

    pub async fn doctor_schedule(&self, doctor_id: i64) -> Result<Vec<Availability>, ScheduleError> {
        if self.state.store.get_doctor(doctor_id).await.is_none() {
            return Err(ScheduleError::DoctorNotFound);
        }
        Ok(self.state.store.availability_by_doctor(doctor_id).await)
    }

    fn validate_slots(&self, slots: &[String]) -> Result<(), ScheduleError> {
        for slot in slots {
            if !is_valid_slot_time(slot) {
                return Err(ScheduleError::InvalidInput(format!(
                    "Invalid time slot format: {slot}"
                )));
            }
        }
        Ok(())
    }
}
