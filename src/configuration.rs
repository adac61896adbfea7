use std::{path::PathBuf, time::Duration};

pub trait Configuration: Clone + Send + Sync + 'static {
    fn api_base_url(&self) -> String;
    fn session_file(&self) -> PathBuf;
    fn request_timeout(&self) -> Duration;
}
