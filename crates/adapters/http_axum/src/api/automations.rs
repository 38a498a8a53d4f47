//! JSON REST handlers for automations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use chainsense_app::ports::{
    AutomationRepository, ContractRepository, DeviceRepository, EventPublisher, EventStore,
};
use chainsense_domain::automation::{Automation, AutomationStatus, Comparator, Condition};
use chainsense_domain::id::{AutomationId, ContractId, DeviceId};

use crate::error::ApiError;
use crate::state::AppState;

/// One trigger condition in a creation request.
#[derive(Deserialize)]
pub struct ConditionRequest {
    pub sensor_field: String,
    pub comparator: Comparator,
    pub value: String,
}

/// Request body for creating an automation.
#[derive(Deserialize)]
pub struct CreateAutomationRequest {
    pub name: String,
    pub description: Option<String>,
    pub device_id: DeviceId,
    pub conditions: Vec<ConditionRequest>,
    pub contract_id: ContractId,
    pub method: String,
}

/// Request body for pausing or resuming an automation.
#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: AutomationStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Automation>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and status endpoints.
pub enum GetResponse {
    Ok(Json<Automation>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Automation>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/automations` — list all automations.
pub async fn list<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let automations = state.automation_service.list_automations().await?;
    Ok(ListResponse::Ok(Json(automations)))
}

/// `GET /api/automations/:id` — get automation by ID.
pub async fn get_one<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let automation_id: AutomationId = super::parse_id(&id, "Automation")?;
    let automation = state
        .automation_service
        .get_automation(automation_id)
        .await?;
    Ok(GetResponse::Ok(Json(automation)))
}

/// `POST /api/automations` — create a new automation.
pub async fn create<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Json(req): Json<CreateAutomationRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let mut builder = Automation::builder()
        .name(req.name)
        .device(req.device_id)
        .contract(req.contract_id)
        .method(req.method);
    if let Some(description) = req.description {
        builder = builder.description(description);
    }
    for condition in req.conditions {
        builder = builder.condition(Condition::new(
            condition.sensor_field,
            condition.comparator,
            condition.value,
        ));
    }

    let automation = builder.build()?;
    let created = state
        .automation_service
        .create_automation(automation)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/automations/:id/status` — pause or resume an automation.
pub async fn set_status<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let automation_id: AutomationId = super::parse_id(&id, "Automation")?;
    let automation = match req.status {
        AutomationStatus::Active => {
            state
                .automation_service
                .resume_automation(automation_id)
                .await?
        }
        AutomationStatus::Paused => {
            state
                .automation_service
                .pause_automation(automation_id)
                .await?
        }
    };
    Ok(GetResponse::Ok(Json(automation)))
}

/// `DELETE /api/automations/:id` — delete an automation.
pub async fn delete<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let automation_id: AutomationId = super::parse_id(&id, "Automation")?;
    state
        .automation_service
        .delete_automation(automation_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
