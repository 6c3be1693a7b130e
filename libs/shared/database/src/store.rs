use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

use shared_models::schema::{
    Appointment, AppointmentStatus, Availability, Doctor, NewAppointment, NewAvailability,
    NewDoctor, NewSpecialty, NewUser, Specialty, User, UserRole,
};

/// In-memory store for all scheduling entities. Single logical owner of the
/// data; every mutation goes through the inner write lock.
///
/// Availability is keyed by the structured pair (doctor_id, date) so that two
/// differently formatted date strings can never alias one record.
pub struct ClinicStore {
    inner: RwLock<StoreInner>,
    // Serializes the check-then-act booking sequence. Coarse by intention:
    // contention is one clinic's worth of patients.
    booking_guard: Mutex<()>,
}

#[derive(Default)]
struct StoreInner {
    users: BTreeMap<i64, User>,
    specialties: BTreeMap<i64, Specialty>,
    doctors: BTreeMap<i64, Doctor>,
    appointments: BTreeMap<i64, Appointment>,
    availability: BTreeMap<(i64, NaiveDate), Availability>,
    sequences: Sequences,
}

/// Store-owned id sequences, one per entity.
#[derive(Default)]
struct Sequences {
    users: i64,
    specialties: i64,
    doctors: i64,
    appointments: i64,
    availability: i64,
}

impl Sequences {
    fn next(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

impl ClinicStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            booking_guard: Mutex::new(()),
        }
    }

    /// Acquire the booking guard. The caller holds it across the
    /// availability/conflict checks and the subsequent insert so no two
    /// bookings of the same (doctor, date, time) can interleave.
    pub async fn lock_bookings(&self) -> MutexGuard<'_, ()> {
        self.booking_guard.lock().await
    }

    // ==========================================================================
    // USER OPERATIONS
    // ==========================================================================

    pub async fn get_user(&self, id: i64) -> Option<User> {
        self.inner.read().await.users.get(&id).cloned()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.values().find(|u| u.username == username).cloned()
    }

    pub async fn users_by_role(&self, role: UserRole) -> Vec<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect()
    }

    pub async fn create_user(&self, new: NewUser) -> User {
        let mut inner = self.inner.write().await;
        let id = Sequences::next(&mut inner.sequences.users);
        let user = User {
            id,
            username: new.username,
            password: new.password,
            full_name: new.full_name,
            social_security_id: new.social_security_id,
            role: new.role,
            email: new.email,
            phone: new.phone,
        };
        inner.users.insert(id, user.clone());
        user
    }

    // ==========================================================================
    // SPECIALTY OPERATIONS
    // ==========================================================================

    pub async fn get_specialties(&self) -> Vec<Specialty> {
        self.inner.read().await.specialties.values().cloned().collect()
    }

    pub async fn get_specialty(&self, id: i64) -> Option<Specialty> {
        self.inner.read().await.specialties.get(&id).cloned()
    }

    pub async fn create_specialty(&self, new: NewSpecialty) -> Specialty {
        let mut inner = self.inner.write().await;
        let id = Sequences::next(&mut inner.sequences.specialties);
        let specialty = Specialty {
            id,
            name: new.name,
            description: new.description,
        };
        inner.specialties.insert(id, specialty.clone());
        specialty
    }

    // ==========================================================================
    // DOCTOR OPERATIONS
    // ==========================================================================

    pub async fn get_doctors(&self) -> Vec<Doctor> {
        self.inner.read().await.doctors.values().cloned().collect()
    }

    pub async fn get_doctor(&self, id: i64) -> Option<Doctor> {
        self.inner.read().await.doctors.get(&id).cloned()
    }

    pub async fn doctors_by_specialty(&self, specialty_id: i64) -> Vec<Doctor> {
        let inner = self.inner.read().await;
        inner
            .doctors
            .values()
            .filter(|d| d.specialty_id == specialty_id)
            .cloned()
            .collect()
    }

    pub async fn doctor_by_user(&self, user_id: i64) -> Option<Doctor> {
        let inner = self.inner.read().await;
        inner.doctors.values().find(|d| d.user_id == user_id).cloned()
    }

    pub async fn create_doctor(&self, new: NewDoctor) -> Doctor {
        let mut inner = self.inner.write().await;
        let id = Sequences::next(&mut inner.sequences.doctors);
        let doctor = Doctor {
            id,
            user_id: new.user_id,
            name: new.name,
            specialty_id: new.specialty_id,
            is_available: new.is_available.unwrap_or(true),
            license_number: new.license_number,
        };
        inner.doctors.insert(id, doctor.clone());
        doctor
    }

    // ==========================================================================
    // APPOINTMENT OPERATIONS
    // ==========================================================================

    pub async fn get_appointments(&self) -> Vec<Appointment> {
        self.inner.read().await.appointments.values().cloned().collect()
    }

    pub async fn get_appointment(&self, id: i64) -> Option<Appointment> {
        self.inner.read().await.appointments.get(&id).cloned()
    }

    pub async fn appointments_by_user(&self, user_id: i64) -> Vec<Appointment> {
        let inner = self.inner.read().await;
        inner
            .appointments
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn appointments_by_doctor(&self, doctor_id: i64) -> Vec<Appointment> {
        let inner = self.inner.read().await;
        inner
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect()
    }

    pub async fn appointments_by_doctor_on(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Vec<Appointment> {
        let inner = self.inner.read().await;
        inner
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id && a.date == date)
            .cloned()
            .collect()
    }

    /// Raw insert with id assignment and timestamping. Does no slot checking;
    /// the booking service performs those checks while holding the booking
    /// guard before calling this.
    pub async fn insert_appointment(&self, new: NewAppointment) -> Appointment {
        let mut inner = self.inner.write().await;
        let id = Sequences::next(&mut inner.sequences.appointments);
        let now = Utc::now();
        let appointment = Appointment {
            id,
            user_id: new.user_id,
            doctor_id: new.doctor_id,
            specialty_id: new.specialty_id,
            date: new.date,
            time: new.time,
            reason: new.reason,
            status: new.status.unwrap_or(AppointmentStatus::Confirmed),
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        debug!("Inserting appointment {} for doctor {}", id, appointment.doctor_id);
        inner.appointments.insert(id, appointment.clone());
        appointment
    }

    /// Raw status write; does not check slot occupancy. Status changes that
    /// put a cancelled appointment back into its slot must go through the
    /// booking service, which re-checks under the booking guard.
    pub async fn update_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
        notes: Option<String>,
    ) -> Option<Appointment> {
        let mut inner = self.inner.write().await;
        let appointment = inner.appointments.get_mut(&id)?;
        appointment.status = status;
        if let Some(notes) = notes {
            appointment.notes = Some(notes);
        }
        appointment.updated_at = Utc::now();
        Some(appointment.clone())
    }

    // ==========================================================================
    // AVAILABILITY OPERATIONS
    // ==========================================================================

    pub async fn get_availability(&self, doctor_id: i64, date: NaiveDate) -> Option<Availability> {
        self.inner.read().await.availability.get(&(doctor_id, date)).cloned()
    }

    pub async fn availability_by_doctor(&self, doctor_id: i64) -> Vec<Availability> {
        let inner = self.inner.read().await;
        inner
            .availability
            .values()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect()
    }

    /// Create or replace the availability record for (doctor_id, date).
    pub async fn create_availability(&self, new: NewAvailability) -> Availability {
        let mut inner = self.inner.write().await;
        let id = Sequences::next(&mut inner.sequences.availability);
        let availability = Availability {
            id,
            doctor_id: new.doctor_id,
            date: new.date,
            time_slots: new.time_slots,
            is_holiday: new.is_holiday.unwrap_or(false),
            blocked_hours: new.blocked_hours.unwrap_or_default(),
        };
        inner
            .availability
            .insert((availability.doctor_id, availability.date), availability.clone());
        availability
    }

    pub async fn update_availability(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        time_slots: Vec<String>,
        blocked_hours: Option<Vec<String>>,
        is_holiday: Option<bool>,
    ) -> Option<Availability> {
        let mut inner = self.inner.write().await;
        let availability = inner.availability.get_mut(&(doctor_id, date))?;
        availability.time_slots = time_slots;
        if let Some(blocked) = blocked_hours {
            availability.blocked_hours = blocked;
        }
        if let Some(holiday) = is_holiday {
            availability.is_holiday = holiday;
        }
        Some(availability.clone())
    }
}

impl Default for ClinicStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::schema::UserRole;

    fn sample_user(username: &str, role: UserRole) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "secret".to_string(),
            full_name: "Test User".to_string(),
            social_security_id: format!("8-{}", username.len()),
            role,
            email: None,
            phone: None,
        }
    }

    fn sample_availability(doctor_id: i64, date: &str) -> NewAvailability {
        NewAvailability {
            doctor_id,
            date: date.parse().unwrap(),
            time_slots: vec!["08:00".to_string(), "08:30".to_string()],
            is_holiday: None,
            blocked_hours: None,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_monotonically_per_entity() {
        let store = ClinicStore::new();
        let u1 = store.create_user(sample_user("ana", UserRole::Patient)).await;
        let u2 = store.create_user(sample_user("luis", UserRole::Doctor)).await;
        let s1 = store
            .create_specialty(NewSpecialty {
                name: "Cardiología".to_string(),
                description: None,
            })
            .await;

        assert_eq!(u1.id, 1);
        assert_eq!(u2.id, 2);
        // Specialty sequence is independent of the user sequence
        assert_eq!(s1.id, 1);
    }

    #[tokio::test]
    async fn user_lookups_by_username_and_role() {
        let store = ClinicStore::new();
        store.create_user(sample_user("ana", UserRole::Patient)).await;
        store.create_user(sample_user("luis", UserRole::Doctor)).await;

        let found = store.get_user_by_username("luis").await.unwrap();
        assert_eq!(found.role, UserRole::Doctor);
        assert!(store.get_user_by_username("nadie").await.is_none());

        let patients = store.users_by_role(UserRole::Patient).await;
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].username, "ana");
        assert_eq!(store.get_user(found.id).await.unwrap().username, "luis");
    }

    #[tokio::test]
    async fn availability_is_unique_per_doctor_and_date() {
        let store = ClinicStore::new();
        store.create_availability(sample_availability(1, "2025-06-10")).await;
        let replaced = store
            .create_availability(NewAvailability {
                time_slots: vec!["09:00".to_string()],
                ..sample_availability(1, "2025-06-10")
            })
            .await;

        let fetched = store
            .get_availability(1, "2025-06-10".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(fetched.id, replaced.id);
        assert_eq!(fetched.time_slots, vec!["09:00"]);
        assert_eq!(store.availability_by_doctor(1).await.len(), 1);
    }

    #[tokio::test]
    async fn update_availability_returns_none_for_missing_record() {
        let store = ClinicStore::new();
        let updated = store
            .update_availability(7, "2025-06-10".parse().unwrap(), vec![], None, None)
            .await;
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn appointment_insert_stamps_defaults_and_is_retrievable() {
        let store = ClinicStore::new();
        let inserted = store
            .insert_appointment(NewAppointment {
                user_id: 1,
                doctor_id: 2,
                specialty_id: 3,
                date: "2025-06-10".parse().unwrap(),
                time: "08:00".to_string(),
                reason: None,
                status: None,
                notes: None,
            })
            .await;

        assert_eq!(inserted.status, AppointmentStatus::Confirmed);
        assert_eq!(inserted.created_at, inserted.updated_at);

        let fetched = store.get_appointment(inserted.id).await.unwrap();
        assert_eq!(fetched.time, "08:00");
        assert!(store.get_appointment(inserted.id + 1).await.is_none());

        let updated = store
            .update_appointment_status(inserted.id, AppointmentStatus::Cancelled, None)
            .await
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Cancelled);
        assert!(updated.updated_at >= updated.created_at);
        assert!(store
            .update_appointment_status(999, AppointmentStatus::Cancelled, None)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn doctor_lookups() {
        let store = ClinicStore::new();
        let doctor = store
            .create_doctor(NewDoctor {
                user_id: 42,
                name: "Dr. Prueba".to_string(),
                specialty_id: 3,
                is_available: None,
                license_number: Some("MD-010".to_string()),
            })
            .await;

        assert!(doctor.is_available);
        assert_eq!(store.doctor_by_user(42).await.unwrap().id, doctor.id);
        assert_eq!(store.doctors_by_specialty(3).await.len(), 1);
        assert!(store.doctors_by_specialty(4).await.is_empty());
        assert_eq!(store.get_doctors().await.len(), 1);
        assert!(store.get_doctor(99).await.is_none());
    }
}
