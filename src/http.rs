use crate::backend::{BookingBackend, SlotQuery};
use crate::error::{backend_message, ApiError};
use crate::types::{Booking, BookingRequest, LoginRequest, RegisterRequest, Slot};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request sender bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        info!(base_url = %base_url, "Created booking API client");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn checked(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        debug!(endpoint, "Sending request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = backend_message(&body);
            warn!(endpoint, status = status.as_u16(), ?message, "Request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let body = self.checked(request, endpoint).await?.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            warn!(endpoint, ?err, "Response body is not the expected JSON");
            ApiError::Decode(err)
        })
    }

    /// Accepts any 2xx body: JSON when it parses, the plain text otherwise,
    /// and `null` when empty.
    async fn fetch_raw(&self, request: RequestBuilder, endpoint: &str) -> Result<Value, ApiError> {
        let body = self.checked(request, endpoint).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[async_trait]
impl BookingBackend for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        let builder = self.client.post(self.url("/register")).json(request);
        self.fetch_raw(builder, "/register").await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Value, ApiError> {
        let builder = self.client.post(self.url("/login")).json(request);
        self.fetch_raw(builder, "/login").await
    }

    async fn slots(&self, token: &str, query: SlotQuery) -> Result<Vec<Slot>, ApiError> {
        let builder = self
            .client
            .get(self.url("/slots"))
            .query(&query.query_pairs())
            .bearer_auth(token);
        self.fetch(builder, "/slots").await
    }

    async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        let builder = self.client.get(self.url("/my-bookings")).bearer_auth(token);
        self.fetch(builder, "/my-bookings").await
    }

    async fn book(&self, token: &str, slot_id: &str) -> Result<(), ApiError> {
        let request = BookingRequest {
            slot_id: slot_id.to_string(),
        };
        let builder = self
            .client
            .post(self.url("/book"))
            .json(&request)
            .bearer_auth(token);
        self.checked(builder, "/book").await?;
        Ok(())
    }
}
