//! Storage ports — repository traits for devices and contracts.

use std::future::Future;

use chainsense_domain::contract::SmartContract;
use chainsense_domain::device::Device;
use chainsense_domain::error::ChainSenseError;
use chainsense_domain::id::{ContractId, DeviceId};

/// Repository for persisting and querying [`Device`]s.
pub trait DeviceRepository {
    /// Create a new device in storage.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, ChainSenseError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, ChainSenseError>> + Send;

    /// Get all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, ChainSenseError>> + Send;

    /// Update an existing device.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, ChainSenseError>> + Send;

    /// Delete a device by its unique identifier.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), ChainSenseError>> + Send;
}

/// Repository for persisting and querying [`SmartContract`] descriptors.
pub trait ContractRepository {
    /// Create a new contract descriptor in storage.
    fn create(
        &self,
        contract: SmartContract,
    ) -> impl Future<Output = Result<SmartContract, ChainSenseError>> + Send;

    /// Get a contract by its unique identifier.
    fn get_by_id(
        &self,
        id: ContractId,
    ) -> impl Future<Output = Result<Option<SmartContract>, ChainSenseError>> + Send;

    /// Get all contracts.
    fn get_all(&self) -> impl Future<Output = Result<Vec<SmartContract>, ChainSenseError>> + Send;

    /// Get all contracts automations may target.
    fn get_active(&self)
    -> impl Future<Output = Result<Vec<SmartContract>, ChainSenseError>> + Send;

    /// Update an existing contract descriptor.
    fn update(
        &self,
        contract: SmartContract,
    ) -> impl Future<Output = Result<SmartContract, ChainSenseError>> + Send;

    /// Delete a contract by its unique identifier.
    fn delete(&self, id: ContractId) -> impl Future<Output = Result<(), ChainSenseError>> + Send;
}
