use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Proof of authentication persisted after a successful register or login.
///
/// The whole response body is kept, so fields the backend adds next to
/// `token` (`role` included) survive a save/load cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Builds a session from an auth response body, if it carries a non-empty token.
    pub fn from_response(body: &Value) -> Option<Self> {
        let mut extra = body.as_object()?.clone();
        match extra.remove("token") {
            Some(Value::String(token)) if !token.is_empty() => Some(Self { token, extra }),
            _ => None,
        }
    }

    /// The role, when the backend sent it as a string.
    pub fn role(&self) -> Option<&str> {
        self.extra.get("role").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "startAt")]
    pub start_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub slot: Option<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub slot_id: String,
}
