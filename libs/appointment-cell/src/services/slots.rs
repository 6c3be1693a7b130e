// libs/appointment-cell/src/services/slots.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use shared_database::AppState;
use shared_models::schema::{Appointment, Availability};

/// Declared availability minus the slots held by non-cancelled appointments,
/// in declared order. A missing record or a holiday yields no open slots.
pub fn open_slots(availability: Option<&Availability>, appointments: &[Appointment]) -> Vec<String> {
    let Some(availability) = availability else {
        return vec![];
    };
    if availability.is_holiday {
        return vec![];
    }

    availability
        .time_slots
        .iter()
        .filter(|slot| {
            !appointments
                .iter()
                .any(|apt| apt.time == **slot && apt.status.occupies_slot())
        })
        .cloned()
        .collect()
}

/// Resolves the bookable slot set for a (doctor, date) pair against the store.
pub struct SlotResolver {
    state: Arc<AppState>,
}

impl SlotResolver {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn resolve_open_slots(&self, doctor_id: i64, date: NaiveDate) -> Vec<String> {
        let availability = self.state.store.get_availability(doctor_id, date).await;
        let appointments = self
            .state
            .store
            .appointments_by_doctor_on(doctor_id, date)
            .await;

        let open = open_slots(availability.as_ref(), &appointments);
        debug!(
            "Resolved {} open slots for doctor {} on {}",
            open.len(),
            doctor_id,
            date
        );
        open
    }

    pub async fn can_book(&self, doctor_id: i64, date: NaiveDate, time: &str) -> bool {
        self.resolve_open_slots(doctor_id, date)
            .await
            .iter()
            .any(|slot| slot == time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_models::schema::AppointmentStatus;

    fn availability(slots: &[&str], is_holiday: bool) -> Availability {
        Availability {
            id: 1,
            doctor_id: 1,
            date: "2025-06-10".parse().unwrap(),
            time_slots: slots.iter().map(|s| s.to_string()).collect(),
            is_holiday,
            blocked_hours: vec![],
        }
    }

    fn appointment(time: &str, status: AppointmentStatus) -> Appointment {
        let now = Utc::now();
        Appointment {
            id: 1,
            user_id: 1,
            doctor_id: 1,
            specialty_id: 1,
            date: "2025-06-10".parse().unwrap(),
            time: time.to_string(),
            reason: None,
            status,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_record_yields_no_slots() {
        assert!(open_slots(None, &[]).is_empty());
    }

    #[test]
    fn holiday_yields_no_slots_regardless_of_declared_times() {
        let avail = availability(&["08:00", "08:30"], true);
        assert!(open_slots(Some(&avail), &[]).is_empty());
    }

    #[test]
    fn booked_slots_are_subtracted_in_declared_order() {
        let avail = availability(&["08:00", "08:30", "09:00"], false);
        let booked = [appointment("08:30", AppointmentStatus::Confirmed)];
        assert_eq!(open_slots(Some(&avail), &booked), vec!["08:00", "09:00"]);
    }

    #[test]
    fn cancelled_appointments_do_not_consume_slots() {
        let avail = availability(&["08:00", "08:30"], false);
        let booked = [appointment("08:00", AppointmentStatus::Cancelled)];
        assert_eq!(open_slots(Some(&avail), &booked), vec!["08:00", "08:30"]);
    }

    #[test]
    fn every_non_cancelled_status_consumes_its_slot() {
        let avail = availability(&["08:00", "08:30", "09:00", "09:30"], false);
        let booked = [
            appointment("08:00", AppointmentStatus::Pending),
            appointment("08:30", AppointmentStatus::Attended),
            appointment("09:00", AppointmentStatus::NoShow),
        ];
        assert_eq!(open_slots(Some(&avail), &booked), vec!["09:30"]);
    }

    #[test]
    fn result_is_a_subsequence_of_declared_slots() {
        let avail = availability(&["14:00", "08:00", "11:00"], false);
        let booked = [appointment("08:00", AppointmentStatus::Confirmed)];
        // Declared order wins, even when it is not sorted
        assert_eq!(open_slots(Some(&avail), &booked), vec!["14:00", "11:00"]);
    }
}
