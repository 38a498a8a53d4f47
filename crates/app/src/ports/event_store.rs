//! Event store port — append-only persistence for events.

use std::future::Future;

use chainsense_domain::error::ChainSenseError;
use chainsense_domain::event::Event;
use chainsense_domain::id::AutomationId;

/// Append & query store for [`Event`]s.
pub trait EventStore {
    /// Append an event.
    fn store(&self, event: Event) -> impl Future<Output = Result<Event, ChainSenseError>> + Send;

    /// Get the most recent events, newest first.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Event>, ChainSenseError>> + Send;

    /// Get the most recent events involving an automation, newest first.
    fn find_by_automation(
        &self,
        automation_id: AutomationId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Event>, ChainSenseError>> + Send;
}
