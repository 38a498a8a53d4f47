//! # chainsensed — chainsense daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing from the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services and the automation engine, injecting
//!   repositories via port traits
//! - Persist bus events into the event store
//! - Build the axum router, bind to a TCP port, and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use chainsense_adapter_http_axum::router;
use chainsense_adapter_http_axum::state::AppState;
use chainsense_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteAutomationRepository, SqliteContractRepository,
    SqliteDeviceRepository, SqliteEventStore,
};
use chainsense_app::automation_engine::AutomationEngine;
use chainsense_app::event_bus::InProcessEventBus;
use chainsense_app::ports::EventStore;
use chainsense_app::services::automation_service::AutomationService;
use chainsense_app::services::contract_service::ContractService;
use chainsense_app::services::device_service::DeviceService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let device_repo = SqliteDeviceRepository::new(pool.clone());
    let contract_repo = SqliteContractRepository::new(pool.clone());
    let automation_repo = SqliteAutomationRepository::new(pool.clone());
    let engine_automation_repo = SqliteAutomationRepository::new(pool.clone());
    let event_store = SqliteEventStore::new(pool.clone());

    // Event bus: grab the persistence subscription before the bus moves
    // into the engine.
    let event_bus = InProcessEventBus::new(config.engine.bus_capacity);
    let mut event_rx = event_bus.subscribe();
    let persist_store = SqliteEventStore::new(pool);
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            if let Err(err) = persist_store.store(event).await {
                tracing::error!(error = %err, "failed to persist event");
            }
        }
    });

    // Services & engine
    let device_service = DeviceService::new(device_repo);
    let contract_service = ContractService::new(contract_repo);
    let automation_service = AutomationService::new(automation_repo);
    let engine = AutomationEngine::new(engine_automation_repo, event_bus);

    // HTTP
    let state = AppState::new(
        device_service,
        contract_service,
        automation_service,
        event_store,
        engine,
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "chainsensed listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
