use chrono::{Duration, Utc};
use tracing::info;

use shared_models::schema::{NewAvailability, NewDoctor, NewSpecialty, NewUser, UserRole};

use crate::store::ClinicStore;

/// Demo data mirroring what a fresh deployment ships with: one patient, one
/// admin, six doctors with their specialties, and a full slot grid for
/// tomorrow. Controlled by `AppConfig::seed_demo_data`.
pub async fn seed_demo_data(store: &ClinicStore) {
    let patient = store
        .create_user(NewUser {
            username: "maria.gonzalez".to_string(),
            password: "password123".to_string(),
            full_name: "María González".to_string(),
            social_security_id: "8-123-456".to_string(),
            role: UserRole::Patient,
            email: Some("maria@example.com".to_string()),
            phone: Some("6000-0000".to_string()),
        })
        .await;

    store
        .create_user(NewUser {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            full_name: "Administrador Sistema".to_string(),
            social_security_id: "8-999-999".to_string(),
            role: UserRole::Admin,
            email: Some("admin@mednova.gov.pa".to_string()),
            phone: Some("6999-9999".to_string()),
        })
        .await;

    let doctors: [(&str, &str, &str, &str, &str); 6] = [
        ("carlos.martinez", "Dr. Carlos Martínez", "Cardiología", "8-111-111", "MD-001"),
        ("ana.rodriguez", "Dra. Ana Rodríguez", "Oftalmología", "8-222-222", "MD-002"),
        ("miguel.lopez", "Dr. Miguel López", "Medicina General", "8-333-333", "MD-003"),
        ("laura.garcia", "Dra. Laura García", "Dermatología", "8-444-444", "MD-004"),
        ("jose.fernandez", "Dr. José Fernández", "Neurología", "8-555-555", "MD-005"),
        ("carmen.silva", "Dra. Carmen Silva", "Traumatología", "8-666-666", "MD-006"),
    ];

    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    let time_slots: Vec<String> = [
        "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00",
        "14:30", "15:00", "15:30", "16:00", "16:30",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for (i, (username, name, specialty, ssn, license)) in doctors.iter().enumerate() {
        let specialty = store
            .create_specialty(NewSpecialty {
                name: specialty.to_string(),
                description: None,
            })
            .await;

        let user = store
            .create_user(NewUser {
                username: username.to_string(),
                password: "doctor123".to_string(),
                full_name: name.to_string(),
                social_security_id: ssn.to_string(),
                role: UserRole::Doctor,
                email: Some(format!("{}@example.com", username.split('.').next().unwrap_or("doctor"))),
                phone: Some(format!("6{0}{0}{0}-{0}{0}{0}{0}", i + 1)),
            })
            .await;

        let doctor = store
            .create_doctor(NewDoctor {
                user_id: user.id,
                name: name.to_string(),
                specialty_id: specialty.id,
                is_available: Some(true),
                license_number: Some(license.to_string()),
            })
            .await;

        store
            .create_availability(NewAvailability {
                doctor_id: doctor.id,
                date: tomorrow,
                time_slots: time_slots.clone(),
                is_holiday: Some(false),
                blocked_hours: Some(vec![]),
            })
            .await;
    }

    info!(
        "Seeded demo data: patient {}, 6 doctors, availability for {}",
        patient.username, tomorrow
    );
}
