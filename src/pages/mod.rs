//! Page objects. Each page mounts against the session, fetches what it
//! shows, renders itself as text and reports where the user goes next.

use chrono::{DateTime, TimeZone};
use std::fmt;
use validator::ValidationErrors;

mod admin;
mod dashboard;
mod home;
mod login;
mod register;
mod schedule;

pub use admin::AdminPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use register::RegisterPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(message) => write!(f, "[ok] {message}"),
            Notice::Error(message) => write!(f, "[error] {message}"),
        }
    }
}

/// Outcome of a page action: notices to show and an optional redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageUpdate {
    pub notices: Vec<Notice>,
    pub redirect: Option<Route>,
}

impl PageUpdate {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn redirect(route: Route) -> Self {
        Self {
            notices: Vec::new(),
            redirect: Some(route),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn merge(mut self, other: PageUpdate) -> Self {
        self.notices.extend(other.notices);
        self.redirect = other.redirect.or(self.redirect);
        self
    }
}

/// `Mon, Oct 19, 09:00 AM`
pub fn format_start<Tz: TimeZone>(start: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    start.format("%a, %b %-d, %I:%M %p").to_string()
}

/// Joins field validation messages, ordered by field name.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {field}"),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
