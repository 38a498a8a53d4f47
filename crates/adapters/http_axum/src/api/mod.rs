//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod contracts;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod readings;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post, put};

use chainsense_app::ports::{
    AutomationRepository, ContractRepository, DeviceRepository, EventPublisher, EventStore,
};
use chainsense_domain::error::NotFoundError;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a path id, mapping failure to a 404 for the named record kind.
pub(crate) fn parse_id<T: FromStr>(raw: &str, entity: &'static str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(chainsense_domain::error::ChainSenseError::from(
            NotFoundError {
                entity,
                id: raw.to_string(),
            },
        ))
    })
}

/// Build the `/api` sub-router.
pub fn routes<DR, CR, AR, EP, ES>() -> Router<AppState<DR, CR, AR, EP, ES>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    CR: ContractRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, CR, AR, EP, ES>).post(devices::create::<DR, CR, AR, EP, ES>),
        )
        .route(
            "/devices/{id}",
            get(devices::get_one::<DR, CR, AR, EP, ES>)
                .delete(devices::delete::<DR, CR, AR, EP, ES>),
        )
        // Contracts
        .route(
            "/contracts",
            get(contracts::list::<DR, CR, AR, EP, ES>)
                .post(contracts::create::<DR, CR, AR, EP, ES>),
        )
        .route(
            "/contracts/{id}",
            get(contracts::get_one::<DR, CR, AR, EP, ES>)
                .delete(contracts::delete::<DR, CR, AR, EP, ES>),
        )
        .route(
            "/contracts/{id}/status",
            put(contracts::set_status::<DR, CR, AR, EP, ES>),
        )
        // Automations
        .route(
            "/automations",
            get(automations::list::<DR, CR, AR, EP, ES>)
                .post(automations::create::<DR, CR, AR, EP, ES>),
        )
        .route(
            "/automations/{id}",
            get(automations::get_one::<DR, CR, AR, EP, ES>)
                .delete(automations::delete::<DR, CR, AR, EP, ES>),
        )
        .route(
            "/automations/{id}/status",
            put(automations::set_status::<DR, CR, AR, EP, ES>),
        )
        .route(
            "/automations/{id}/events",
            get(events::for_automation::<DR, CR, AR, EP, ES>),
        )
        // Events
        .route("/events", get(events::list::<DR, CR, AR, EP, ES>))
        // Readings
        .route("/readings", post(readings::ingest::<DR, CR, AR, EP, ES>))
}
