use crate::error::ApiError;
use crate::types::{Booking, LoginRequest, RegisterRequest, Slot};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

/// Date filter for `GET /slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotQuery {
    Range { from: NaiveDate, to: NaiveDate },
    Day(NaiveDate),
}

impl SlotQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            SlotQuery::Range { from, to } => vec![("from", format_day(*from)), ("to", format_day(*to))],
            SlotQuery::Day(date) => vec![("date", format_day(*date))],
        }
    }
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<Value, ApiError>;
    async fn slots(&self, token: &str, query: SlotQuery) -> Result<Vec<Slot>, ApiError>;
    async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError>;
    async fn book(&self, token: &str, slot_id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();

        assert_eq!(
            SlotQuery::Range { from, to }.query_pairs(),
            vec![("from", "2026-03-01".to_string()), ("to", "2026-03-08".to_string())]
        );
        assert_eq!(
            SlotQuery::Day(from).query_pairs(),
            vec![("date", "2026-03-01".to_string())]
        );
    }
}
