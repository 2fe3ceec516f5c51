//! HTTP handlers for the simulated device

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use firetv_core::{ControlCommand, MediaCommand};

use crate::error::SimError;
use crate::state::{CommandKind, FireTvSimulator, PinOutcome};

/// Header carrying the bearer token on authenticated routes
const TOKEN_HEADER: &str = "x-client-token";

#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    action: String,
}

#[derive(Debug, Deserialize)]
pub struct PinDisplayBody {
    #[serde(rename = "friendlyName")]
    friendly_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PinVerifyBody {
    pin: String,
}

/// `GET /` - reachability probe
pub async fn probe(State(sim): State<Arc<FireTvSimulator>>) -> Result<&'static str, SimError> {
    if sim.record_probe() {
        Ok("Fire TV simulator")
    } else {
        Err(SimError::Unavailable)
    }
}

/// `POST /apps/FireTVRemote` - wake from sleep, unauthenticated
pub async fn wake(State(sim): State<Arc<FireTvSimulator>>) -> StatusCode {
    sim.record_wake();
    StatusCode::OK
}

/// `POST /v1/FireTV/pin/display` - open the pairing window
pub async fn pin_display(
    State(sim): State<Arc<FireTvSimulator>>,
    Json(body): Json<PinDisplayBody>,
) -> Json<Value> {
    let pin = sim.open_pin_window();
    // stands in for the PIN shown on the TV screen
    info!(client = %body.friendly_name, pin, "pairing PIN displayed");
    Json(json!({ "status": "success" }))
}

/// `POST /v1/FireTV/pin/verify` - exchange the PIN for a token
pub async fn pin_verify(
    State(sim): State<Arc<FireTvSimulator>>,
    Json(body): Json<PinVerifyBody>,
) -> Result<Json<Value>, SimError> {
    match sim.check_pin(&body.pin) {
        PinOutcome::NoWindow => Err(SimError::NoPairingWindow),
        PinOutcome::WrongPin => Err(SimError::WrongPin),
        PinOutcome::Issued(token) => Ok(Json(json!({ "description": token }))),
    }
}

/// `POST /v1/FireTV?action=...` - navigation, volume and power
pub async fn control_command(
    State(sim): State<Arc<FireTvSimulator>>,
    headers: HeaderMap,
    Query(query): Query<ActionQuery>,
) -> Result<StatusCode, SimError> {
    authorize(&sim, &headers)?;
    if ControlCommand::from_name(&query.action).is_none() {
        return Err(SimError::UnknownAction(query.action));
    }
    info!(action = %query.action, "control command");
    sim.record_command(CommandKind::Control, &query.action);
    Ok(StatusCode::OK)
}

/// `POST /v1/media?action=...` - playback
pub async fn media_command(
    State(sim): State<Arc<FireTvSimulator>>,
    headers: HeaderMap,
    Query(query): Query<ActionQuery>,
) -> Result<StatusCode, SimError> {
    authorize(&sim, &headers)?;
    if MediaCommand::from_name(&query.action).is_none() {
        return Err(SimError::UnknownAction(query.action));
    }
    info!(action = %query.action, "media command");
    sim.record_command(CommandKind::Media, &query.action);
    Ok(StatusCode::OK)
}

/// `POST /v1/FireTV/app/{package}` - launch an application
pub async fn launch_app(
    State(sim): State<Arc<FireTvSimulator>>,
    headers: HeaderMap,
    Path(package): Path<String>,
) -> Result<StatusCode, SimError> {
    authorize(&sim, &headers)?;
    info!(package = %package, "app launch");
    sim.record_command(CommandKind::Launch, &package);
    Ok(StatusCode::OK)
}

/// Reject command requests whose token was not issued by this device
fn authorize(sim: &FireTvSimulator, headers: &HeaderMap) -> Result<(), SimError> {
    let token = headers.get(TOKEN_HEADER).and_then(|value| value.to_str().ok());
    if sim.token_valid(token) {
        Ok(())
    } else {
        Err(SimError::InvalidToken)
    }
}
