//! Device service — use-cases for managing registered devices.

use chainsense_domain::device::Device;
use chainsense_domain::error::{ChainSenseError, NotFoundError};
use chainsense_domain::id::DeviceId;
use chainsense_domain::time::Timestamp;

use crate::ports::DeviceRepository;

/// Application service for device CRUD and liveness tracking.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn register_device(&self, device: Device) -> Result<Device, ChainSenseError> {
        device.validate()?;
        self.repo.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when no device with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, ChainSenseError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, ChainSenseError> {
        self.repo.get_all().await
    }

    /// Mark a device online and stamp `last_seen`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when the device does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn mark_seen(&self, id: DeviceId, at: Timestamp) -> Result<Device, ChainSenseError> {
        let mut device = self.get_device(id).await?;
        device.seen_at(at);
        self.repo.update(device).await
    }

    /// Update an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, device))]
    pub async fn update_device(&self, device: Device) -> Result<Device, ChainSenseError> {
        device.validate()?;
        self.repo.update(device).await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), ChainSenseError> {
        self.repo.delete(id).await
    }
}
