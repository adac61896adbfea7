use crate::configuration::Configuration;
use clap::{Parser, Subcommand};
use std::{path::PathBuf, time::Duration};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://application-booking-backend.onrender.com/api";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Parser, Debug, Clone)]
#[command(name = "booking_client")]
#[command(about = "Book clinic appointments from the command line")]
pub struct ConfigurationHandler {
    /// Base URL of the booking API
    #[arg(long, env = "BOOKING_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// File the session is persisted in
    #[arg(long, env = "BOOKING_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "BOOKING_TIMEOUT_SECS", default_value_t = 30, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the welcome page
    Home,
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored and its role
    Session,
    /// Slots for the next 7 days and your bookings
    Dashboard {
        /// Book the slot with this id
        #[arg(long)]
        book: Option<String>,
    },
    /// Slots for a single day of the coming week
    Admin {
        /// Day offset from today (0 = today)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(0..7))]
        day: u64,
        /// Book the slot with this id
        #[arg(long)]
        book: Option<String>,
    },
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            debug!(?err, "No .env file loaded");
        }
        Self::parse()
    }

    pub fn command(&self) -> Command {
        self.command.clone()
    }
}

impl Configuration for ConfigurationHandler {
    fn api_base_url(&self) -> String {
        self.api_url.clone()
    }

    fn session_file(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("booking_client"))
                .unwrap_or_default()
                .join(SESSION_FILE_NAME)
        })
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Result<ConfigurationHandler, clap::Error> {
        ConfigurationHandler::try_parse_from(std::iter::once("booking_client").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let configuration = parse(&["dashboard"]).unwrap();

        assert_eq!(configuration.api_base_url(), DEFAULT_API_URL);
        assert_eq!(configuration.request_timeout(), Duration::from_secs(30));
        assert!(configuration.session_file().ends_with(SESSION_FILE_NAME));
        assert_eq!(configuration.command(), Command::Dashboard { book: None });
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let configuration = parse(&[
            "admin",
            "--day",
            "3",
            "--book",
            "s1",
            "--api-url",
            "http://localhost:5000/api",
            "--session-file",
            "/tmp/booking.json",
        ])
        .unwrap();

        assert_eq!(configuration.api_base_url(), "http://localhost:5000/api");
        assert_eq!(configuration.session_file(), PathBuf::from("/tmp/booking.json"));
        assert_eq!(
            configuration.command(),
            Command::Admin {
                day: 3,
                book: Some("s1".into())
            }
        );
    }

    #[test_case::test_case(&["admin", "--day", "7"] ; "day outside the week")]
    #[test_case::test_case(&["login", "--email", "a@b.c"] ; "missing password")]
    #[test_case::test_case(&[] ; "missing command")]
    fn test_rejected_arguments(args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn test_register_arguments() {
        let configuration = parse(&[
            "register",
            "--name",
            "Stefan",
            "--email",
            "stefan@example.com",
            "--password",
            "123",
        ])
        .unwrap();

        assert_eq!(
            configuration.command(),
            Command::Register {
                name: "Stefan".into(),
                email: "stefan@example.com".into(),
                password: "123".into(),
            }
        );
    }
}
