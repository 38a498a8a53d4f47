//! Automation engine — reacts to sensor readings by evaluating and firing
//! automations.
//!
//! The engine keeps the latest observed value per `(device, field)` and,
//! for each incoming reading, checks all active automations bound to the
//! reading's device. When every condition holds it stamps `last_triggered`
//! and publishes the resulting events. Actually invoking the contract
//! on-chain is a collaborator's job; the engine stops at the published
//! [`EventType::ContractInvoked`] event.

use std::collections::HashMap;

use tokio::sync::Mutex;

use chainsense_domain::error::ChainSenseError;
use chainsense_domain::event::{Event, EventType};
use chainsense_domain::id::{AutomationId, DeviceId};
use chainsense_domain::reading::SensorReading;

use crate::ports::{AutomationRepository, EventPublisher};

/// Reactive engine that evaluates automations against incoming readings.
pub struct AutomationEngine<AR, EP> {
    automation_repo: AR,
    publisher: EP,
    latest: Mutex<HashMap<(DeviceId, String), f64>>,
}

impl<AR, EP> AutomationEngine<AR, EP>
where
    AR: AutomationRepository,
    EP: EventPublisher,
{
    /// Create a new engine with an empty observation cache.
    pub fn new(automation_repo: AR, publisher: EP) -> Self {
        Self {
            automation_repo,
            publisher,
            latest: Mutex::new(HashMap::new()),
        }
    }

    /// Process a single reading against all active automations.
    ///
    /// The reading updates the observation cache first, so a condition on
    /// the reading's own field sees the new value. Returns the ids of the
    /// automations that fired.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading or updating automations fails.
    #[tracing::instrument(skip(self, reading), fields(device_id = %reading.device_id, field = %reading.field))]
    pub async fn process_reading(
        &self,
        reading: &SensorReading,
    ) -> Result<Vec<AutomationId>, ChainSenseError> {
        let snapshot = {
            let mut latest = self.latest.lock().await;
            latest.insert((reading.device_id, reading.field.clone()), reading.value);
            latest.clone()
        };

        self.publisher
            .publish(
                Event::new(
                    EventType::ReadingReceived,
                    serde_json::json!({"field": reading.field, "value": reading.value}),
                )
                .with_device(reading.device_id),
            )
            .await?;

        let automations = self.automation_repo.get_active().await?;
        let mut triggered = Vec::new();

        for mut automation in automations {
            if automation.device_id != reading.device_id {
                continue;
            }
            let device_id = automation.device_id;
            let conditions_met = automation
                .conditions_met(|field| snapshot.get(&(device_id, field.to_string())).copied());
            if !conditions_met {
                continue;
            }

            tracing::info!(
                automation = %automation.name,
                method = %automation.method,
                "automation fired"
            );

            automation.last_triggered = Some(chainsense_domain::time::now());
            let automation = self.automation_repo.update(automation).await?;

            self.publisher
                .publish(
                    Event::new(
                        EventType::AutomationTriggered,
                        serde_json::json!({"name": automation.name}),
                    )
                    .with_device(automation.device_id)
                    .with_automation(automation.id),
                )
                .await?;
            self.publisher
                .publish(
                    Event::new(
                        EventType::ContractInvoked,
                        serde_json::json!({
                            "contract_id": automation.contract_id,
                            "method": automation.method,
                        }),
                    )
                    .with_automation(automation.id),
                )
                .await?;

            triggered.push(automation.id);
        }

        Ok(triggered)
    }
}
