//! Event publisher port — fire-and-forget publication of domain events.

use std::future::Future;

use chainsense_domain::error::ChainSenseError;
use chainsense_domain::event::Event;

/// Publishes [`Event`]s to whoever is listening.
pub trait EventPublisher {
    /// Publish an event. Succeeds even when nobody is subscribed.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), ChainSenseError>> + Send;
}
