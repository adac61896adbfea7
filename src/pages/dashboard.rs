use super::schedule::Schedule;
use super::PageUpdate;
use crate::auth::AuthService;
use crate::backend::{BookingBackend, SlotQuery};
use crate::session_store::SessionStore;
use chrono::{Days, NaiveDate};
use std::fmt;

const WINDOW_DAYS: u64 = 7;

/// Patient dashboard: a week of bookable slots plus the patient's bookings.
pub struct DashboardPage<B, S> {
    schedule: Schedule<B, S>,
    today: NaiveDate,
}

impl<B: BookingBackend, S: SessionStore> DashboardPage<B, S> {
    pub fn new(auth: AuthService<B, S>, today: NaiveDate) -> Self {
        Self {
            schedule: Schedule::new(auth),
            today,
        }
    }

    pub fn query(&self) -> SlotQuery {
        SlotQuery::Range {
            from: self.today,
            to: self.today + Days::new(WINDOW_DAYS),
        }
    }

    pub async fn mount(&mut self) -> PageUpdate {
        self.schedule.load(self.query()).await
    }

    pub async fn book(&mut self, slot_id: &str) -> PageUpdate {
        let query = self.query();
        self.schedule.book(slot_id, query).await
    }

    pub fn logout(&self) -> PageUpdate {
        self.schedule.logout()
    }
}

impl<B: BookingBackend, S: SessionStore> fmt::Display for DashboardPage<B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Patient Dashboard")?;
        writeln!(f)?;
        self.schedule
            .render(f, "No available slots for the next 7 days.")
    }
}
