// libs/appointment-cell/src/services/calendar.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use shared_database::AppState;

use crate::models::BookingError;
use crate::services::slots::SlotResolver;

/// Reduces day-level slot resolution to a per-day "has any open slot" flag
/// for a whole month. Weekends are closed unconditionally, with no store
/// lookup performed.
pub struct CalendarService {
    state: Arc<AppState>,
}

impl CalendarService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn month_availability(
        &self,
        doctor_id: i64,
        year: i32,
        month: u32,
    ) -> Result<BTreeMap<u32, bool>, BookingError> {
        if doctor_id <= 0 {
            return Err(BookingError::InvalidInput(format!(
                "Invalid doctor ID: {doctor_id}"
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(BookingError::InvalidInput(format!(
                "Invalid year/month: {year}/{month}"
            )));
        }

        let resolver = SlotResolver::new(self.state.clone());
        let mut days = BTreeMap::new();

        for day in 1..=31 {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                break;
            };
            let open = match date.weekday() {
                Weekday::Sat | Weekday::Sun => false,
                _ => !resolver.resolve_open_slots(doctor_id, date).await.is_empty(),
            };
            days.insert(day, open);
        }

        debug!(
            "Calendar for doctor {} {}/{}: {} open days",
            doctor_id,
            year,
            month,
            days.values().filter(|open| **open).count()
        );
        Ok(days)
    }
}
