//! JSON REST handlers for the event audit trail.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use chainsense_app::ports::{
    AutomationRepository, ContractRepository, DeviceRepository, EventPublisher, EventStore,
};
use chainsense_domain::event::Event;
use chainsense_domain::id::AutomationId;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;

/// Query parameters for event listing.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the event listing endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Event>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/events` — list recent events, newest first.
pub async fn list<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let events = state.event_store.get_recent(limit).await?;
    Ok(ListResponse::Ok(Json(events)))
}

/// `GET /api/automations/:id/events` — events for one automation.
pub async fn for_automation<DR, CR, AR, EP, ES>(
    State(state): State<AppState<DR, CR, AR, EP, ES>>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let automation_id: AutomationId = super::parse_id(&id, "Automation")?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let events = state
        .event_store
        .find_by_automation(automation_id, limit)
        .await?;
    Ok(ListResponse::Ok(Json(events)))
}
