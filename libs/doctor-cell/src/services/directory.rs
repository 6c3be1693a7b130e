// libs/doctor-cell/src/services/directory.rs
use std::sync::Arc;

use shared_database::AppState;
use shared_models::schema::{Doctor, Specialty};

use crate::models::ScheduleError;

/// Read-only access to the specialty and doctor directory.
pub struct DirectoryService {
    state: Arc<AppState>,
}

impl DirectoryService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn list_specialties(&self) -> Vec<Specialty> {
        self.state.store.get_specialties().await
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.state.store.get_doctors().await
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, ScheduleError> {
        self.state
            .store
            .get_doctor(doctor_id)
            .await
            .ok_or(ScheduleError::DoctorNotFound)
    }

    pub async fn doctors_by_specialty(&self, specialty_id: i64) -> Vec<Doctor> {
        self.state.store.doctors_by_specialty(specialty_id).await
    }
}
