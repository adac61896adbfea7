use crate::backend::BookingBackend;
use crate::error::{ApiError, SessionStoreError};
use crate::session_store::SessionStore;
use crate::types::{LoginRequest, RegisterRequest, Session};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] SessionStoreError),
}

impl AuthError {
    pub fn notice_text(&self, fallback: &str) -> String {
        match self {
            AuthError::Api(err) => err.notice_text(fallback),
            AuthError::Storage(_) => fallback.to_string(),
        }
    }
}

/// Register/login/logout on top of a backend and a session store.
#[derive(Debug, Clone)]
pub struct AuthService<B, S> {
    backend: B,
    store: S,
}

impl<B: BookingBackend, S: SessionStore> AuthService<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self { backend, store }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the raw response body whether or not it carried a token.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, AuthError> {
        let body = self.backend.register(request).await?;
        self.remember(&body)?;
        Ok(body)
    }

    /// Returns the raw response body whether or not it carried a token.
    pub async fn login(&self, request: &LoginRequest) -> Result<Value, AuthError> {
        let body = self.backend.login(request).await?;
        self.remember(&body)?;
        Ok(body)
    }

    pub fn logout(&self) -> Result<(), SessionStoreError> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn role(&self) -> Option<String> {
        self.store.role()
    }

    fn remember(&self, body: &Value) -> Result<(), SessionStoreError> {
        match Session::from_response(body) {
            Some(session) => {
                self.store.save(&session)?;
                info!(role = ?session.role(), "Session stored");
            }
            None => warn!("Auth response carried no token, session left untouched"),
        }
        Ok(())
    }
}
