use std::process::ExitCode;

use crate::{
    app::App, auth::AuthService, configuration::Configuration,
    configuration_handler::ConfigurationHandler, http::ApiClient,
    session_store::FileSessionStore,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod auth;
mod backend;
mod configuration;
mod configuration_handler;
mod error;
mod http;
mod pages;
mod session_store;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let backend = match ApiClient::new(
        &configuration.api_base_url(),
        configuration.request_timeout(),
    ) {
        Ok(backend) => backend,
        Err(err) => {
            error!(?err, "Failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let session_file = configuration.session_file();
    info!(session_file = %session_file.display(), "Using session storage");
    let store = FileSessionStore::new(session_file);

    let app = App::new(AuthService::new(backend, store));
    app.run(configuration.command()).await.into()
}
