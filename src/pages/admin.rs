use super::schedule::Schedule;
use super::PageUpdate;
use crate::auth::AuthService;
use crate::backend::{BookingBackend, SlotQuery};
use crate::session_store::SessionStore;
use chrono::{Days, NaiveDate};
use std::fmt;

const DAYS_SHOWN: u64 = 7;

/// Day-by-day slot view with a strip of the next seven days.
pub struct AdminPage<B, S> {
    schedule: Schedule<B, S>,
    today: NaiveDate,
    selected: NaiveDate,
}

impl<B: BookingBackend, S: SessionStore> AdminPage<B, S> {
    pub fn new(auth: AuthService<B, S>, today: NaiveDate) -> Self {
        Self {
            schedule: Schedule::new(auth),
            today,
            selected: today,
        }
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        (0..DAYS_SHOWN)
            .map(|offset| self.today + Days::new(offset))
            .collect()
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub async fn mount(&mut self) -> PageUpdate {
        self.schedule.load(SlotQuery::Day(self.selected)).await
    }

    /// Switches the visible day and reloads it.
    pub async fn select_date(&mut self, date: NaiveDate) -> PageUpdate {
        self.selected = date;
        self.mount().await
    }

    pub async fn book(&mut self, slot_id: &str) -> PageUpdate {
        self.schedule
            .book(slot_id, SlotQuery::Day(self.selected))
            .await
    }
}

impl<B: BookingBackend, S: SessionStore> fmt::Display for AdminPage<B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Patient Dashboard")?;
        writeln!(f)?;

        let strip: Vec<String> = self
            .days()
            .into_iter()
            .map(|day| {
                let label = day.format("%a %-d").to_string();
                if day == self.selected {
                    format!("[{label}]")
                } else {
                    format!(" {label} ")
                }
            })
            .collect();
        writeln!(f, "{}", strip.join(" "))?;
        writeln!(f)?;

        self.schedule.render(f, "No available slots for this day.")
    }
}
