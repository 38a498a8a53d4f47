//! Automation service — use-cases for managing automations.

use chainsense_domain::automation::{Automation, AutomationStatus};
use chainsense_domain::error::{ChainSenseError, NotFoundError};
use chainsense_domain::id::AutomationId;

use crate::ports::AutomationRepository;

/// Application service for automation CRUD and status transitions.
pub struct AutomationService<R> {
    repo: R,
}

impl<R: AutomationRepository> AutomationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new automation after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, automation), fields(automation_name = %automation.name))]
    pub async fn create_automation(
        &self,
        automation: Automation,
    ) -> Result<Automation, ChainSenseError> {
        automation.validate()?;
        self.repo.create(automation).await
    }

    /// Look up an automation by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when no automation with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_automation(&self, id: AutomationId) -> Result<Automation, ChainSenseError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all automations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_automations(&self) -> Result<Vec<Automation>, ChainSenseError> {
        self.repo.get_all().await
    }

    /// Get all active automations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_active(&self) -> Result<Vec<Automation>, ChainSenseError> {
        self.repo.get_active().await
    }

    /// Update an existing automation.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, automation))]
    pub async fn update_automation(
        &self,
        automation: Automation,
    ) -> Result<Automation, ChainSenseError> {
        automation.validate()?;
        self.repo.update(automation).await
    }

    /// Stop evaluating an automation against incoming readings.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when the automation does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn pause_automation(&self, id: AutomationId) -> Result<Automation, ChainSenseError> {
        self.set_status(id, AutomationStatus::Paused).await
    }

    /// Resume evaluating an automation against incoming readings.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when the automation does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn resume_automation(&self, id: AutomationId) -> Result<Automation, ChainSenseError> {
        self.set_status(id, AutomationStatus::Active).await
    }

    async fn set_status(
        &self,
        id: AutomationId,
        status: AutomationStatus,
    ) -> Result<Automation, ChainSenseError> {
        let mut automation = self.get_automation(id).await?;
        automation.status = status;
        self.repo.update(automation).await
    }

    /// Delete an automation by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_automation(&self, id: AutomationId) -> Result<(), ChainSenseError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainsense_domain::automation::{Comparator, Condition};
    use chainsense_domain::error::ValidationError;
    use chainsense_domain::id::{ContractId, DeviceId};
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    struct InMemoryAutomationRepo {
        store: Mutex<HashMap<AutomationId, Automation>>,
    }

    impl Default for InMemoryAutomationRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
            }
        }
    }

    impl AutomationRepository for InMemoryAutomationRepo {
        fn create(
            &self,
            automation: Automation,
        ) -> impl Future<Output = Result<Automation, ChainSenseError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(automation.id, automation.clone());
            async { Ok(automation) }
        }

        fn get_by_id(
            &self,
            id: AutomationId,
        ) -> impl Future<Output = Result<Option<Automation>, ChainSenseError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, ChainSenseError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Automation> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn get_active(
            &self,
        ) -> impl Future<Output = Result<Vec<Automation>, ChainSenseError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Automation> =
                store.values().filter(|a| a.is_active()).cloned().collect();
            async { Ok(result) }
        }

        fn update(
            &self,
            automation: Automation,
        ) -> impl Future<Output = Result<Automation, ChainSenseError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(automation.id, automation.clone());
            async { Ok(automation) }
        }

        fn delete(
            &self,
            id: AutomationId,
        ) -> impl Future<Output = Result<(), ChainSenseError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.remove(&id);
            async { Ok(()) }
        }
    }

    fn make_service() -> AutomationService<InMemoryAutomationRepo> {
        AutomationService::new(InMemoryAutomationRepo::default())
    }

    fn valid_automation() -> Automation {
        Automation::builder()
            .name("Frost guard")
            .device(DeviceId::new())
            .condition(Condition::new("temperature", Comparator::LessThan, "4"))
            .contract(ContractId::new())
            .method("closeVents")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_automation_when_valid() {
        let svc = make_service();
        let automation = valid_automation();
        let id = automation.id;

        let created = svc.create_automation(automation).await.unwrap();
        assert_eq!(created.id, id);

        let fetched = svc.get_automation(id).await.unwrap();
        assert_eq!(fetched.name, "Frost guard");
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_empty() {
        let svc = make_service();
        let mut automation = valid_automation();
        automation.name = String::new();

        let result = svc.create_automation(automation).await;
        assert!(matches!(
            result,
            Err(ChainSenseError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_automation_missing() {
        let svc = make_service();
        let result = svc.get_automation(AutomationId::new()).await;
        assert!(matches!(result, Err(ChainSenseError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_automations() {
        let svc = make_service();
        svc.create_automation(valid_automation()).await.unwrap();
        let mut second = valid_automation();
        second.name = "Second".to_string();
        svc.create_automation(second).await.unwrap();

        let all = svc.list_automations().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_list_only_active_automations() {
        let svc = make_service();
        svc.create_automation(valid_automation()).await.unwrap();

        let mut paused = valid_automation();
        paused.name = "Paused".to_string();
        paused.status = AutomationStatus::Paused;
        svc.create_automation(paused).await.unwrap();

        let active = svc.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert!(active[0].is_active());
    }

    #[tokio::test]
    async fn should_pause_and_resume_automation() {
        let svc = make_service();
        let automation = valid_automation();
        let id = automation.id;
        svc.create_automation(automation).await.unwrap();

        let paused = svc.pause_automation(id).await.unwrap();
        assert_eq!(paused.status, AutomationStatus::Paused);

        let resumed = svc.resume_automation(id).await.unwrap();
        assert_eq!(resumed.status, AutomationStatus::Active);
    }

    #[tokio::test]
    async fn should_update_automation() {
        let svc = make_service();
        let automation = valid_automation();
        let id = automation.id;
        svc.create_automation(automation).await.unwrap();

        let mut updated = svc.get_automation(id).await.unwrap();
        updated.name = "Updated name".to_string();
        let saved = svc.update_automation(updated).await.unwrap();
        assert_eq!(saved.name, "Updated name");
    }

    #[tokio::test]
    async fn should_delete_automation() {
        let svc = make_service();
        let automation = valid_automation();
        let id = automation.id;
        svc.create_automation(automation).await.unwrap();

        svc.delete_automation(id).await.unwrap();

        let result = svc.get_automation(id).await;
        assert!(matches!(result, Err(ChainSenseError::NotFound(_))));
    }
}
