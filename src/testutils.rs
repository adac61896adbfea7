use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{
    backend::{BookingBackend, SlotQuery},
    error::{ApiError, SessionStoreError},
    session_store::SessionStore,
    types::{Booking, LoginRequest, RegisterRequest, Session, Slot},
};

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub failure_status: AtomicU64,
    pub failure_message: Mutex<Option<String>>,
    pub calls_to_register: AtomicU64,
    pub calls_to_login: AtomicU64,
    pub calls_to_slots: AtomicU64,
    pub calls_to_my_bookings: AtomicU64,
    pub calls_to_book: AtomicU64,
    pub auth_response: Mutex<Value>,
    pub slots: Mutex<Vec<Slot>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub tokens_seen: Mutex<Vec<String>>,
    pub slot_queries: Mutex<Vec<SlotQuery>>,
    pub booked_slot_ids: Mutex<Vec<String>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            failure_status: AtomicU64::new(500),
            failure_message: Mutex::default(),
            calls_to_register: AtomicU64::default(),
            calls_to_login: AtomicU64::default(),
            calls_to_slots: AtomicU64::default(),
            calls_to_my_bookings: AtomicU64::default(),
            calls_to_book: AtomicU64::default(),
            auth_response: Mutex::new(json!({ "token": "token-123", "role": "patient" })),
            slots: Mutex::default(),
            bookings: Mutex::default(),
            tokens_seen: Mutex::default(),
            slot_queries: Mutex::default(),
            booked_slot_ids: Mutex::default(),
        }
    }
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner::new()))
    }

    pub fn set_auth_response(&self, body: Value) {
        *self.0.auth_response.lock().unwrap() = body;
    }

    pub fn set_slots(&self, slots: Vec<Slot>) {
        *self.0.slots.lock().unwrap() = slots;
    }

    pub fn set_bookings(&self, bookings: Vec<Booking>) {
        *self.0.bookings.lock().unwrap() = bookings;
    }

    pub fn fail_with(&self, status: u16, message: Option<&str>) {
        self.0.success.store(false, Ordering::SeqCst);
        self.0
            .failure_status
            .store(u64::from(status), Ordering::SeqCst);
        *self.0.failure_message.lock().unwrap() = message.map(str::to_string);
    }

    pub fn total_calls(&self) -> u64 {
        self.0.calls_to_register.load(Ordering::SeqCst)
            + self.0.calls_to_login.load(Ordering::SeqCst)
            + self.0.calls_to_slots.load(Ordering::SeqCst)
            + self.0.calls_to_my_bookings.load(Ordering::SeqCst)
            + self.0.calls_to_book.load(Ordering::SeqCst)
    }

    fn result(&self) -> Result<(), ApiError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(ApiError::Status {
                status: self.0.failure_status.load(Ordering::SeqCst) as u16,
                message: self.0.failure_message.lock().unwrap().clone(),
            }),
        }
    }

    fn record_token(&self, token: &str) {
        self.0.tokens_seen.lock().unwrap().push(token.to_string());
    }
}

#[async_trait]
impl BookingBackend for MockBookingBackend {
    async fn register(&self, _request: &RegisterRequest) -> Result<Value, ApiError> {
        self.0.calls_to_register.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.auth_response.lock().unwrap().clone())
    }

    async fn login(&self, _request: &LoginRequest) -> Result<Value, ApiError> {
        self.0.calls_to_login.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.auth_response.lock().unwrap().clone())
    }

    async fn slots(&self, token: &str, query: SlotQuery) -> Result<Vec<Slot>, ApiError> {
        self.0.calls_to_slots.fetch_add(1, Ordering::SeqCst);
        self.record_token(token);
        self.0.slot_queries.lock().unwrap().push(query);
        self.result()?;
        Ok(self.0.slots.lock().unwrap().clone())
    }

    async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        self.0.calls_to_my_bookings.fetch_add(1, Ordering::SeqCst);
        self.record_token(token);
        self.result()?;
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    async fn book(&self, token: &str, slot_id: &str) -> Result<(), ApiError> {
        self.0.calls_to_book.fetch_add(1, Ordering::SeqCst);
        self.record_token(token);
        self.0
            .booked_slot_ids
            .lock()
            .unwrap()
            .push(slot_id.to_string());
        self.result()
    }
}

/// In-memory stand-in for the on-disk store. Holds the serialized record,
/// so a malformed value can be planted with [`MemorySessionStore::set_raw`].
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    record: Arc<Mutex<Option<String>>>,
    clear_fails: Arc<AtomicBool>,
}

impl MemorySessionStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set_raw(&json!({ "token": token, "role": "patient" }).to_string());
        store
    }

    pub fn set_raw(&self, raw: &str) {
        *self.record.lock().unwrap() = Some(raw.to_string());
    }

    /// Makes every later `clear` fail as if the file were read-only.
    pub fn fail_clear(&self) {
        self.clear_fails.store(true, Ordering::SeqCst);
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self.record.lock().unwrap() = Some(serde_json::to_string(session)?);
        Ok(())
    }

    fn load(&self) -> Option<Session> {
        let raw = self.record.lock().unwrap().clone()?;
        serde_json::from_str(&raw).ok()
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        if self.clear_fails.load(Ordering::SeqCst) {
            return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into());
        }
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

pub fn slot(id: &str, start_at: &str) -> Slot {
    Slot {
        id: id.into(),
        start_at: start_at.parse::<DateTime<Utc>>().unwrap(),
    }
}
