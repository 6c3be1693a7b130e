// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{info, warn};

use shared_database::AppState;
use shared_models::schema::{is_valid_slot_time, Appointment, AppointmentStatus, NewAppointment};

use crate::models::BookingError;
use crate::services::slots;

/// Books appointments while upholding the one hard invariant of the system:
/// at most one non-cancelled appointment per (doctor, date, time).
pub struct BookingService {
    state: Arc<AppState>,
}

impl BookingService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn book_appointment(
        &self,
        request: NewAppointment,
    ) -> Result<Appointment, BookingError> {
        if request.doctor_id <= 0 {
            return Err(BookingError::InvalidInput(format!(
                "Invalid doctor ID: {}",
                request.doctor_id
            )));
        }
        if !is_valid_slot_time(&request.time) {
            return Err(BookingError::InvalidInput(format!(
                "Invalid time slot format: {}",
                request.time
            )));
        }

        // Hold the booking guard across check and insert so a concurrent
        // request cannot take the slot between the two steps.
        let _guard = self.state.store.lock_bookings().await;

        let availability = self
            .state
            .store
            .get_availability(request.doctor_id, request.date)
            .await;
        let existing = self
            .state
            .store
            .appointments_by_doctor_on(request.doctor_id, request.date)
            .await;

        let declared = slots::open_slots(availability.as_ref(), &[])
            .iter()
            .any(|slot| slot == &request.time);
        let taken = existing
            .iter()
            .any(|apt| apt.time == request.time && apt.status.occupies_slot());

        if !declared {
            warn!(
                "Rejecting booking for doctor {} on {} {}: slot not declared",
                request.doctor_id, request.date, request.time
            );
            return Err(BookingError::SlotNotAvailable);
        }
        if taken {
            warn!(
                "Rejecting booking for doctor {} on {} {}: slot already booked",
                request.doctor_id, request.date, request.time
            );
            return Err(BookingError::SlotAlreadyBooked);
        }

        let appointment = self.state.store.insert_appointment(request).await;
        info!(
            "Booked appointment {} for doctor {} on {} {}",
            appointment.id, appointment.doctor_id, appointment.date, appointment.time
        );
        Ok(appointment)
    }

    /// Applies a status change. Reviving a cancelled appointment re-runs the
    /// occupancy check under the booking guard, so the slot cannot end up
    /// held twice after a cancel / rebook / un-cancel sequence.
    pub async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
        notes: Option<String>,
    ) -> Result<Appointment, BookingError> {
        let current = self
            .state
            .store
            .get_appointment(id)
            .await
            .ok_or(BookingError::NotFound(id))?;

        if !current.status.occupies_slot() && status.occupies_slot() {
            let _guard = self.state.store.lock_bookings().await;
            let taken = self
                .state
                .store
                .appointments_by_doctor_on(current.doctor_id, current.date)
                .await
                .iter()
                .any(|apt| {
                    apt.id != id && apt.time == current.time && apt.status.occupies_slot()
                });
            if taken {
                warn!(
                    "Rejecting status change for appointment {}: slot {} {} was rebooked",
                    id, current.date, current.time
                );
                return Err(BookingError::SlotAlreadyBooked);
            }
            return self
                .state
                .store
                .update_appointment_status(id, status, notes)
                .await
                .ok_or(BookingError::NotFound(id));
        }

        self.state
            .store
            .update_appointment_status(id, status, notes)
            .await
            .ok_or(BookingError::NotFound(id))
    }
}
