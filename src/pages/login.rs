use super::{validation_message, Notice, PageUpdate, Route};
use crate::auth::AuthService;
use crate::backend::BookingBackend;
use crate::session_store::SessionStore;
use crate::types::LoginRequest;
use tracing::error;
use validator::Validate;

pub struct LoginPage<B, S> {
    auth: AuthService<B, S>,
}

impl<B: BookingBackend, S: SessionStore> LoginPage<B, S> {
    pub fn new(auth: AuthService<B, S>) -> Self {
        Self { auth }
    }

    pub async fn submit(&self, request: LoginRequest) -> PageUpdate {
        if let Err(errors) = request.validate() {
            return PageUpdate::stay().with_notice(Notice::Error(validation_message(&errors)));
        }

        match self.auth.login(&request).await {
            Ok(_) => PageUpdate::redirect(Route::Dashboard)
                .with_notice(Notice::Success("Login successful!".into())),
            Err(err) => {
                error!(?err, "Login failed");
                PageUpdate::stay().with_notice(Notice::Error(err.notice_text("Login failed")))
            }
        }
    }
}
