//! # chainsense-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `chainsense-app::ports`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `chainsense-app` (for port traits) and `chainsense-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod automation_repo;
pub mod contract_repo;
pub mod device_repo;
pub mod error;
pub mod event_store;
pub mod pool;

pub use automation_repo::SqliteAutomationRepository;
pub use contract_repo::SqliteContractRepository;
pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use event_store::SqliteEventStore;
pub use pool::{Config, Database};
