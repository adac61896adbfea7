use super::{validation_message, Notice, PageUpdate, Route};
use crate::auth::AuthService;
use crate::backend::BookingBackend;
use crate::session_store::SessionStore;
use crate::types::RegisterRequest;
use tracing::error;
use validator::Validate;

pub struct RegisterPage<B, S> {
    auth: AuthService<B, S>,
}

impl<B: BookingBackend, S: SessionStore> RegisterPage<B, S> {
    pub fn new(auth: AuthService<B, S>) -> Self {
        Self { auth }
    }

    pub async fn submit(&self, request: RegisterRequest) -> PageUpdate {
        if let Err(errors) = request.validate() {
            return PageUpdate::stay().with_notice(Notice::Error(validation_message(&errors)));
        }

        match self.auth.register(&request).await {
            Ok(_) => PageUpdate::redirect(Route::Dashboard).with_notice(Notice::Success(
                "Registration successful! Redirecting to dashboard...".into(),
            )),
            Err(err) => {
                error!(?err, "Registration failed");
                PageUpdate::stay().with_notice(Notice::Error(err.notice_text("Registration failed")))
            }
        }
    }
}
