//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    countdown::{Field, TimerEvent},
    state::{AppState, CounterState, OfferState, TimerState},
};
use super::responses::{CounterResponse, HealthResponse, OfferResponse, StatusResponse, TimerResponse};

/// Body of PUT /timer/input; omitted fields are left as they are
#[derive(Debug, Default, Deserialize)]
pub struct InputUpdate {
    pub hours: Option<String>,
    pub minutes: Option<String>,
    pub seconds: Option<String>,
}

fn timer_event(
    state: &Arc<AppState>,
    event: TimerEvent,
    message: &str,
) -> Result<Json<TimerResponse>, StatusCode> {
    let name = event.name();
    match state.dispatch(event) {
        Ok(timer) => {
            info!("Timer {} endpoint called - phase is {}", name, timer.phase);
            Ok(Json(TimerResponse::new(message, timer)))
        }
        Err(e) => {
            error!("Failed to apply timer {}: {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer - Current timer snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerState>, StatusCode> {
    state.get_timer_state().map(Json).map_err(|e| {
        error!("Failed to get timer state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle PUT /timer/input - Edit the HH/MM/SS fields
pub async fn timer_input_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<InputUpdate>,
) -> Result<Json<TimerResponse>, StatusCode> {
    let edits = [
        (Field::Hours, update.hours),
        (Field::Minutes, update.minutes),
        (Field::Seconds, update.seconds),
    ];

    let mut timer = None;
    for (field, value) in edits {
        let Some(value) = value else { continue };
        match state.dispatch(TimerEvent::Edit { field, value }) {
            Ok(t) => timer = Some(t),
            Err(e) => {
                error!("Failed to edit timer input: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    let timer = match timer {
        Some(t) => t,
        None => {
            warn!("Timer input update without any field");
            state.get_timer_state().map_err(|e| {
                error!("Failed to get timer state: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?
        }
    };

    Ok(Json(TimerResponse::new("Timer input updated", timer)))
}

/// Handle POST /timer/start - Start or resume the countdown
pub async fn timer_start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_event(&state, TimerEvent::Start, "Timer started")
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn timer_pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_event(&state, TimerEvent::Pause, "Timer paused")
}

/// Handle POST /timer/toggle - Pause/Resume button
pub async fn timer_toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_event(&state, TimerEvent::Toggle, "Timer toggled")
}

/// Handle POST /timer/reset - Clear the countdown and its inputs
pub async fn timer_reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_event(&state, TimerEvent::Reset, "Timer reset")
}

/// Handle GET /counter
pub async fn counter_handler(State(state): State<Arc<AppState>>) -> Result<Json<CounterResponse>, StatusCode> {
    match state.get_counter() {
        Ok(counter) => Ok(Json(counter.into())),
        Err(e) => {
            error!("Failed to get counter: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /counter/{increment,decrement,reset}
pub async fn counter_action_handler(
    State(state): State<Arc<AppState>>,
    Path(action): Path<String>,
) -> Result<Json<CounterResponse>, StatusCode> {
    let updater: fn(&mut CounterState) = match action.as_str() {
        "increment" => CounterState::increment,
        "decrement" => CounterState::decrement,
        "reset" => CounterState::reset,
        _ => {
            warn!("Unknown counter action: {}", action);
            return Err(StatusCode::NOT_FOUND);
        }
    };

    match state.update_counter(&format!("counter-{}", action), updater) {
        Ok(counter) => Ok(Json(counter.into())),
        Err(e) => {
            error!("Failed to update counter: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /offer
pub async fn offer_handler(State(state): State<Arc<AppState>>) -> Result<Json<OfferResponse>, StatusCode> {
    match state.get_offer() {
        Ok(offer) => Ok(Json(offer.into())),
        Err(e) => {
            error!("Failed to get offer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /offer/{open,close,accept}
pub async fn offer_action_handler(
    State(state): State<Arc<AppState>>,
    Path(action): Path<String>,
) -> Result<Json<OfferResponse>, StatusCode> {
    let updater: fn(&mut OfferState) = match action.as_str() {
        "open" => OfferState::open,
        "close" => OfferState::close,
        "accept" => OfferState::accept,
        _ => {
            warn!("Unknown offer action: {}", action);
            return Err(StatusCode::NOT_FOUND);
        }
    };

    match state.update_offer(&format!("offer-{}", action), updater) {
        Ok(offer) => Ok(Json(offer.into())),
        Err(e) => {
            error!("Failed to update offer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Every widget plus server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let counter = match state.get_counter() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to get counter: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let offer = match state.get_offer() {
        Ok(o) => o,
        Err(e) => {
            error!("Failed to get offer: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        counter,
        offer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
