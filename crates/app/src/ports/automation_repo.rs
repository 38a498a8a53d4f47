//! Automation repository port — persistence for automations.

use std::future::Future;

use chainsense_domain::automation::Automation;
use chainsense_domain::error::ChainSenseError;
use chainsense_domain::id::AutomationId;

/// Repository for persisting and querying [`Automation`]s.
pub trait AutomationRepository {
    /// Create a new automation in storage.
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, ChainSenseError>> + Send;

    /// Get an automation by its unique identifier.
    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, ChainSenseError>> + Send;

    /// Get all automations.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, ChainSenseError>> + Send;

    /// Get all active automations.
    fn get_active(&self) -> impl Future<Output = Result<Vec<Automation>, ChainSenseError>> + Send;

    /// Update an existing automation.
    fn update(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, ChainSenseError>> + Send;

    /// Delete an automation by its unique identifier.
    fn delete(&self, id: AutomationId) -> impl Future<Output = Result<(), ChainSenseError>> + Send;
}
