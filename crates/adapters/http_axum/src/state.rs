//! Shared application state for axum handlers.

use std::sync::Arc;

use chainsense_app::automation_engine::AutomationEngine;
use chainsense_app::ports::{
    AutomationRepository, ContractRepository, DeviceRepository, EventPublisher, EventStore,
};
use chainsense_app::services::automation_service::AutomationService;
use chainsense_app::services::contract_service::ContractService;
use chainsense_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types, event publisher, and event store to
/// avoid dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone` — only the `Arc` wrappers are
/// cloned.
pub struct AppState<DR, CR, AR, EP, ES> {
    /// Device CRUD service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Contract descriptor CRUD service.
    pub contract_service: Arc<ContractService<CR>>,
    /// Automation CRUD service.
    pub automation_service: Arc<AutomationService<AR>>,
    /// Event store for querying persisted events.
    pub event_store: Arc<ES>,
    /// Engine that evaluates automations against incoming readings.
    pub engine: Arc<AutomationEngine<AR, EP>>,
}

impl<DR, CR, AR, EP, ES> AppState<DR, CR, AR, EP, ES>
where
    DR: DeviceRepository,
    CR: ContractRepository,
    AR: AutomationRepository,
    EP: EventPublisher,
    ES: EventStore,
{
    /// Bundle the services and engine into one shared state value.
    pub fn new(
        device_service: DeviceService<DR>,
        contract_service: ContractService<CR>,
        automation_service: AutomationService<AR>,
        event_store: ES,
        engine: AutomationEngine<AR, EP>,
    ) -> Self {
        Self {
            device_service: Arc::new(device_service),
            contract_service: Arc::new(contract_service),
            automation_service: Arc::new(automation_service),
            event_store: Arc::new(event_store),
            engine: Arc::new(engine),
        }
    }
}

impl<DR, CR, AR, EP, ES> Clone for AppState<DR, CR, AR, EP, ES> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            contract_service: Arc::clone(&self.contract_service),
            automation_service: Arc::clone(&self.automation_service),
            event_store: Arc::clone(&self.event_store),
            engine: Arc::clone(&self.engine),
        }
    }
}
