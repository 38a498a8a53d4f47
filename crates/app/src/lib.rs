//! # chainsense-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository` — CRUD for devices
//!   - `ContractRepository` — CRUD for smart contract descriptors
//!   - `AutomationRepository` — CRUD for automations
//!   - `EventStore` — append & query events
//!   - `EventPublisher` — fire-and-forget event publication
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService`, `ContractService`, `AutomationService`
//!   - `AutomationEngine` — evaluate conditions against readings
//!   - the **creation wizards** — step-gated construction of automations
//!     and contract descriptors
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `chainsense-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod automation_engine;
pub mod event_bus;
pub mod ports;
pub mod services;
pub mod wizard;
