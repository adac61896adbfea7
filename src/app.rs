use crate::auth::AuthService;
use crate::backend::BookingBackend;
use crate::configuration_handler::Command;
use crate::pages::{
    AdminPage, DashboardPage, HomePage, LoginPage, Notice, PageUpdate, RegisterPage, Route,
};
use crate::session_store::SessionStore;
use crate::types::{LoginRequest, RegisterRequest};
use chrono::{Days, NaiveDate, Utc};
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Runs one command and follows the redirects it produces.
pub struct App<B, S> {
    auth: AuthService<B, S>,
    today: NaiveDate,
}

impl<B, S> App<B, S>
where
    B: BookingBackend + Clone,
    S: SessionStore + Clone,
{
    pub fn new(auth: AuthService<B, S>) -> Self {
        Self::with_today(auth, Utc::now().date_naive())
    }

    pub fn with_today(auth: AuthService<B, S>, today: NaiveDate) -> Self {
        Self { auth, today }
    }

    pub async fn run(&self, command: Command) -> Outcome {
        let mut update = match command {
            Command::Home => PageUpdate::redirect(Route::Home),
            Command::Register {
                name,
                email,
                password,
            } => {
                let request = RegisterRequest {
                    name,
                    email,
                    password,
                };
                RegisterPage::new(self.auth.clone()).submit(request).await
            }
            Command::Login { email, password } => {
                let request = LoginRequest { email, password };
                LoginPage::new(self.auth.clone()).submit(request).await
            }
            Command::Logout => {
                let update = DashboardPage::new(self.auth.clone(), self.today).logout();
                report(&update.notices);
                if update.redirect.is_none() {
                    return Outcome::Failed;
                }
                println!("Signed out");
                return Outcome::Done;
            }
            Command::Session => {
                self.print_session();
                return Outcome::Done;
            }
            Command::Dashboard { book } => self.dashboard(book.as_deref()).await,
            Command::Admin { day, book } => self.admin(day, book.as_deref()).await,
        };

        loop {
            report(&update.notices);
            update = match update.redirect {
                None => return failure_code(&update.notices),
                Some(Route::Dashboard) => self.dashboard(None).await,
                Some(Route::Home) => {
                    println!("{HomePage}");
                    return Outcome::Done;
                }
                Some(route @ (Route::Login | Route::Register)) => {
                    info!(%route, "Redirected");
                    println!("Please sign in: booking_client login --email <EMAIL> --password <PASSWORD>");
                    return Outcome::Failed;
                }
            };
        }
    }

    async fn dashboard(&self, book: Option<&str>) -> PageUpdate {
        let mut page = DashboardPage::new(self.auth.clone(), self.today);
        let mut update = page.mount().await;
        if update.redirect.is_some() {
            return update;
        }
        if let Some(slot_id) = book {
            update = update.merge(page.book(slot_id).await);
            if update.redirect.is_some() {
                return update;
            }
        }
        println!("{page}");
        update
    }

    async fn admin(&self, day: u64, book: Option<&str>) -> PageUpdate {
        let mut page = AdminPage::new(self.auth.clone(), self.today);
        let mut update = page.select_date(self.today + Days::new(day)).await;
        if update.redirect.is_some() {
            return update;
        }
        info!(day = %page.selected(), "Showing day");
        if let Some(slot_id) = book {
            update = update.merge(page.book(slot_id).await);
            if update.redirect.is_some() {
                return update;
            }
        }
        println!("{page}");
        update
    }

    fn print_session(&self) {
        match self.auth.token() {
            Some(_) => println!(
                "Signed in (role: {})",
                self.auth.role().unwrap_or_else(|| "unknown".into())
            ),
            None => println!("Not signed in"),
        }
    }
}

fn report(notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::Success(_) => println!("{notice}"),
            Notice::Error(_) => eprintln!("{notice}"),
        }
    }
}

fn failure_code(notices: &[Notice]) -> Outcome {
    if notices
        .iter()
        .any(|notice| matches!(notice, Notice::Error(_)))
    {
        Outcome::Failed
    } else {
        Outcome::Done
    }
}
