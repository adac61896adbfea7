use super::{format_start, Notice, PageUpdate, Route};
use crate::auth::AuthService;
use crate::backend::{BookingBackend, SlotQuery};
use crate::error::ApiError;
use crate::session_store::SessionStore;
use crate::types::{Booking, Slot};
use chrono::Local;
use std::fmt;
use tracing::{error, info};

/// Slot and booking lists shared by the dashboard and the day view.
pub(super) struct Schedule<B, S> {
    auth: AuthService<B, S>,
    slots: Vec<Slot>,
    bookings: Vec<Booking>,
}

impl<B: BookingBackend, S: SessionStore> Schedule<B, S> {
    pub(super) fn new(auth: AuthService<B, S>) -> Self {
        Self {
            auth,
            slots: Vec::new(),
            bookings: Vec::new(),
        }
    }

    /// Without a token this redirects to login before any request goes out.
    pub(super) async fn load(&mut self, query: SlotQuery) -> PageUpdate {
        let Some(token) = self.auth.token() else {
            info!("No session, redirecting to login");
            return PageUpdate::redirect(Route::Login);
        };
        self.refresh(&token, query).await
    }

    pub(super) async fn book(&mut self, slot_id: &str, query: SlotQuery) -> PageUpdate {
        let Some(token) = self.auth.token() else {
            info!("No session, redirecting to login");
            return PageUpdate::redirect(Route::Login);
        };

        if let Err(err) = self.auth.backend().book(&token, slot_id).await {
            error!(?err, slot_id, "Booking failed");
            return PageUpdate::stay().with_notice(Notice::Error(err.notice_text("Booking failed")));
        }

        info!(slot_id, "Slot booked");
        PageUpdate::stay()
            .with_notice(Notice::Success("Appointment booked successfully!".into()))
            .merge(self.refresh(&token, query).await)
    }

    /// A session that could not be cleared stays on the page with an error.
    pub(super) fn logout(&self) -> PageUpdate {
        match self.auth.logout() {
            Ok(()) => PageUpdate::redirect(Route::Login),
            Err(err) => {
                error!(?err, "Failed to clear session");
                PageUpdate::stay().with_notice(Notice::Error("Logout failed".into()))
            }
        }
    }

    /// Any fetch failure is treated as an expired session.
    async fn refresh(&mut self, token: &str, query: SlotQuery) -> PageUpdate {
        match self.fetch(token, query).await {
            Ok(()) => PageUpdate::stay(),
            Err(err) => {
                error!(?err, status = ?err.status(), "Failed to fetch schedule");
                let mut update = self
                    .logout()
                    .with_notice(Notice::Error(err.notice_text("Failed to fetch data")));
                update.redirect = Some(Route::Login);
                update
            }
        }
    }

    async fn fetch(&mut self, token: &str, query: SlotQuery) -> Result<(), ApiError> {
        self.slots = self.auth.backend().slots(token, query).await?;
        self.bookings = self.auth.backend().my_bookings(token).await?;
        Ok(())
    }

    pub(super) fn render(&self, f: &mut fmt::Formatter<'_>, empty_slots: &str) -> fmt::Result {
        writeln!(f, "Available Slots")?;
        if self.slots.is_empty() {
            writeln!(f, "  {empty_slots}")?;
        }
        for slot in &self.slots {
            writeln!(
                f,
                "  {}  {}",
                format_start(&slot.start_at.with_timezone(&Local)),
                slot.id
            )?;
        }

        writeln!(f)?;
        writeln!(f, "My Bookings")?;
        if self.bookings.is_empty() {
            writeln!(f, "  You have no bookings.")?;
        }
        for booking in &self.bookings {
            let start = match &booking.slot {
                Some(slot) => format_start(&slot.start_at.with_timezone(&Local)),
                None => "Slot not found".to_string(),
            };
            writeln!(f, "  Booking for: {start}")?;
        }
        Ok(())
    }
}

