//! JSON REST handlers for smart contract descriptors.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use chainsense_app::ports::{
    AutomationRepository, ContractRepository, DeviceRepository, EventPublisher, EventStore,
};
use chainsense_domain::contract::{ContractStatus, SmartContract};
use chainsense_domain::id::ContractId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a contract.
#[derive(Deserialize)]
pub struct CreateContractRequest {
    pub name: String,
    pub network: Option<String>,
    pub address: String,
    pub methods: Vec<String>,
}

/// Request body for changing a contract's status.
#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: ContractStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<SmartContract>>),
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
    Ok(Json<SmartContract>),
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
    Created(Json<SmartContract>),
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

/// `GET /api/contracts` — list all contract descriptors.
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
    let contracts = state.contract_service.list_contracts().await?;
    Ok(ListResponse::Ok(Json(contracts)))
}

/// `GET /api/contracts/:id` — get contract by ID.
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
    let contract_id: ContractId = super::parse_id(&id, "Contract")?;
    let contract = state.contract_service.get_contract(contract_id).await?;
    Ok(GetResponse::Ok(Json(contract)))
}

/// `POST /api/contracts` — register a new contract descriptor.
pub async fn create<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Json(req): Json<CreateContractRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let mut builder = SmartContract::builder().name(req.name).address(req.address);
    if let Some(network) = req.network {
        builder = builder.network(network);
    }
    for method in req.methods {
        builder = builder.method(method);
    }
    let contract = builder.build()?;
    let created = state.contract_service.register_contract(contract).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/contracts/:id/status` — activate or deactivate a contract.
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
    let contract_id: ContractId = super::parse_id(&id, "Contract")?;
    let contract = match req.status {
        ContractStatus::Active => state.contract_service.activate_contract(contract_id).await?,
        ContractStatus::Inactive => {
            state
                .contract_service
                .deactivate_contract(contract_id)
                .await?
        }
    };
    Ok(GetResponse::Ok(Json(contract)))
}

/// `DELETE /api/contracts/:id` — delete a contract descriptor.
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
    let contract_id: ContractId = super::parse_id(&id, "Contract")?;
    state.contract_service.delete_contract(contract_id).await?;
    Ok(DeleteResponse::NoContent)
}
