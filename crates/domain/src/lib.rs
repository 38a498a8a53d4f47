//! # chainsense-domain
//!
//! Pure domain model for the chainsense IoT-to-blockchain platform.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (connected hardware reporting sensor readings)
//! - Define **Smart contracts** (on-chain programs the platform drives)
//! - Define **Automations** (condition rules that bridge sensor data to
//!   contract method calls)
//! - Define **Sensor readings** (observed values) and **Events**
//!   (append-only records of what happened)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod contract;
pub mod device;
pub mod event;
pub mod reading;
