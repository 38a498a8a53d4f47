//! JSON REST handler for sensor reading ingestion.
//!
//! Readings are the inbound edge of the platform: each accepted reading
//! marks its device as seen and is evaluated by the automation engine.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use chainsense_app::ports::{
    AutomationRepository, ContractRepository, DeviceRepository, EventPublisher, EventStore,
};
use chainsense_domain::id::{AutomationId, DeviceId};
use chainsense_domain::reading::SensorReading;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for submitting a reading.
#[derive(Deserialize)]
pub struct IngestRequest {
    pub device_id: DeviceId,
    pub field: String,
    pub value: f64,
}

/// Response body: which automations fired for this reading.
#[derive(Serialize)]
pub struct IngestResponse {
    pub triggered: Vec<AutomationId>,
}

/// Possible responses from the ingest endpoint.
pub enum IngestResult {
    Accepted(Json<IngestResponse>),
}

impl IntoResponse for IngestResult {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `POST /api/readings` — submit a sensor reading.
///
/// Rejects readings from unregistered devices with a 404.
pub async fn ingest<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Json(req): Json<IngestRequest>,
) -> Result<IngestResult, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let reading = SensorReading::new(req.device_id, req.field, req.value);

    // Unknown devices bounce here before touching the engine.
    state
        .device_service
        .mark_seen(req.device_id, reading.recorded_at)
        .await?;

    let triggered = state.engine.process_reading(&reading).await?;
    Ok(IngestResult::Accepted(Json(IngestResponse { triggered })))
}
