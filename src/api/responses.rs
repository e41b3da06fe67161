//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CounterState, OfferState, TimerState};

/// Response for timer endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl TimerResponse {
    pub fn new(message: impl Into<String>, timer: TimerState) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Response for counter endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterResponse {
    pub timestamp: DateTime<Utc>,
    pub count: i64,
}

impl From<CounterState> for CounterResponse {
    fn from(counter: CounterState) -> Self {
        Self {
            timestamp: Utc::now(),
            count: counter.count,
        }
    }
}

/// Response for offer endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferResponse {
    pub timestamp: DateTime<Utc>,
    pub modal_open: bool,
    pub accepted: bool,
    pub label: String,
}

impl From<OfferState> for OfferResponse {
    fn from(offer: OfferState) -> Self {
        Self {
            timestamp: Utc::now(),
            label: offer.label().to_string(),
            modal_open: offer.modal_open,
            accepted: offer.accepted,
        }
    }
}

/// Status response covering every widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub counter: CounterState,
    pub offer: OfferState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
