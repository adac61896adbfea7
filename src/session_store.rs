use crate::error::SessionStoreError;
use crate::types::Session;
use serde_json::{Map, Value};
use std::{fs, io::ErrorKind, path::PathBuf};
use tracing::{debug, warn};

/// Storage key the session record lives under.
pub const SESSION_KEY: &str = "user";

#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Persists the full record, replacing any previous session.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;
    /// Reads the record back. Missing or unparseable records read as `None`.
    fn load(&self) -> Option<Session>;
    fn clear(&self) -> Result<(), SessionStoreError>;

    fn token(&self) -> Option<String> {
        self.load()
            .map(|session| session.token)
            .filter(|token| !token.is_empty())
    }

    fn role(&self) -> Option<String> {
        self.load()
            .and_then(|session| session.role().map(str::to_string))
    }
}

/// Key/value JSON document on disk, the session stored under [`SESSION_KEY`].
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<Map<String, Value>, SessionStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(?err, path = %self.path.display(), "Discarding unreadable session storage");
                Ok(Map::new())
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(SESSION_KEY.to_string(), serde_json::to_value(session)?);
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn load(&self) -> Option<Session> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                warn!(?err, "Failed to read session storage");
                return None;
            }
        };
        let record = entries.remove(SESSION_KEY)?;

        match serde_json::from_value(record) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(?err, "Stored session is malformed");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut entries = self.read_entries()?;
        if entries.remove(SESSION_KEY).is_some() {
            self.write_entries(&entries)?;
            debug!(path = %self.path.display(), "Session cleared");
        }
        Ok(())
    }
}
