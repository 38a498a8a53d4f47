//! # chainsense-adapter-http-axum
//!
//! HTTP adapter using [axum](https://docs.rs/axum) — serves the REST API.
//!
//! ## Responsibilities
//! - Expose devices, contracts, automations, and events over JSON REST
//! - Accept sensor readings (`POST /api/readings`) and drive the
//!   automation engine with them
//! - Map domain errors to HTTP status codes
//!
//! ## Dependency rule
//! Depends on `chainsense-app` (for services and ports) and
//! `chainsense-domain` (for domain types). The `app` and `domain` crates
//! must never reference this adapter.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
