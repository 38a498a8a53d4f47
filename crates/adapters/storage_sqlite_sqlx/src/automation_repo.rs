//! `SQLite` implementation of [`AutomationRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use chainsense_app::ports::AutomationRepository;
use chainsense_domain::automation::{Automation, AutomationStatus, Condition};
use chainsense_domain::error::ChainSenseError;
use chainsense_domain::id::{AutomationId, ContractId, DeviceId};

use crate::error::StorageError;

struct Wrapper(Automation);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Automation> {
        value.map(|w| w.0)
    }
}

fn decode_err(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

fn status_from_str(raw: &str) -> Result<AutomationStatus, sqlx::Error> {
    match raw {
        "active" => Ok(AutomationStatus::Active),
        "paused" => Ok(AutomationStatus::Paused),
        other => Err(sqlx::Error::Decode(
            format!("unknown automation status: {other}").into(),
        )),
    }
}

fn status_as_str(status: AutomationStatus) -> &'static str {
    match status {
        AutomationStatus::Active => "active",
        AutomationStatus::Paused => "paused",
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;
        let device_id: String = row.try_get("device_id")?;
        let conditions_json: String = row.try_get("conditions")?;
        let contract_id: String = row.try_get("contract_id")?;
        let method: String = row.try_get("method")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let last_triggered: Option<String> = row.try_get("last_triggered")?;

        let id = AutomationId::from_str(&id).map_err(decode_err)?;
        let device_id = DeviceId::from_str(&device_id).map_err(decode_err)?;
        let contract_id = ContractId::from_str(&contract_id).map_err(decode_err)?;
        let conditions: Vec<Condition> =
            serde_json::from_str(&conditions_json).map_err(decode_err)?;
        let status = status_from_str(&status)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.to_utc())
            .map_err(decode_err)?;
        let last_triggered = last_triggered
            .map(|s| {
                chrono::DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.to_utc())
                    .map_err(decode_err)
            })
            .transpose()?;

        Ok(Self(Automation {
            id,
            name,
            description,
            device_id,
            conditions,
            contract_id,
            method,
            status,
            created_at,
            last_triggered,
        }))
    }
}

/// `SQLite`-backed automation repository.
pub struct SqliteAutomationRepository {
    pool: SqlitePool,
}

impl SqliteAutomationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AutomationRepository for SqliteAutomationRepository {
    async fn create(&self, automation: Automation) -> Result<Automation, ChainSenseError> {
        let conditions_json =
            serde_json::to_string(&automation.conditions).map_err(StorageError::from)?;
        let last_triggered = automation.last_triggered.map(|ts| ts.to_rfc3339());

        sqlx::query(
                "INSERT INTO automations (id, name, description, device_id, conditions, contract_id, method, status, created_at, last_triggered) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(automation.id.to_string())
            .bind(&automation.name)
            .bind(&automation.description)
            .bind(automation.device_id.to_string())
            .bind(&conditions_json)
            .bind(automation.contract_id.to_string())
            .bind(&automation.method)
            .bind(status_as_str(automation.status))
            .bind(automation.created_at.to_rfc3339())
            .bind(&last_triggered)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, ChainSenseError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM automations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Automation>, ChainSenseError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM automations ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_active(&self) -> Result<Vec<Automation>, ChainSenseError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM automations WHERE status = 'active' ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, automation: Automation) -> Result<Automation, ChainSenseError> {
        let conditions_json =
            serde_json::to_string(&automation.conditions).map_err(StorageError::from)?;
        let last_triggered = automation.last_triggered.map(|ts| ts.to_rfc3339());

        sqlx::query(
                "UPDATE automations SET name = ?, description = ?, device_id = ?, conditions = ?, contract_id = ?, method = ?, status = ?, created_at = ?, last_triggered = ? WHERE id = ?",
            )
            .bind(&automation.name)
            .bind(&automation.description)
            .bind(automation.device_id.to_string())
            .bind(&conditions_json)
            .bind(automation.contract_id.to_string())
            .bind(&automation.method)
            .bind(status_as_str(automation.status))
            .bind(automation.created_at.to_rfc3339())
            .bind(&last_triggered)
            .bind(automation.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(automation)
    }

    async fn delete(&self, id: AutomationId) -> Result<(), ChainSenseError> {
        sqlx::query("DELETE FROM automations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use chainsense_domain::automation::Comparator;

    async fn setup() -> SqliteAutomationRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteAutomationRepository::new(db.pool().clone())
    }

    fn valid_automation() -> Automation {
        Automation::builder()
            .name("Frost guard")
            .description("Close the vents when it freezes")
            .device(DeviceId::new())
            .condition(Condition::new("temperature", Comparator::LessThan, "4"))
            .contract(ContractId::new())
            .method("closeVents")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_automation() {
        let repo = setup().await;
        let automation = valid_automation();
        let id = automation.id;

        repo.create(automation).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.name, "Frost guard");
        assert_eq!(fetched.conditions.len(), 1);
        assert_eq!(fetched.conditions[0].comparator, Comparator::LessThan);
        assert_eq!(
            fetched.description.as_deref(),
            Some("Close the vents when it freezes")
        );
    }

    #[tokio::test]
    async fn should_return_none_when_automation_missing() {
        let repo = setup().await;
        let result = repo.get_by_id(AutomationId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_automations_ordered_by_name() {
        let repo = setup().await;
        let mut second = valid_automation();
        second.name = "Zebra rule".to_string();
        repo.create(second).await.unwrap();
        repo.create(valid_automation()).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Frost guard");
        assert_eq!(all[1].name, "Zebra rule");
    }

    #[tokio::test]
    async fn should_list_only_active_automations() {
        let repo = setup().await;
        repo.create(valid_automation()).await.unwrap();
        let mut paused = valid_automation();
        paused.name = "Paused rule".to_string();
        paused.status = AutomationStatus::Paused;
        repo.create(paused).await.unwrap();

        let active = repo.get_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert!(active[0].is_active());
    }

    #[tokio::test]
    async fn should_persist_update_with_last_triggered() {
        let repo = setup().await;
        let automation = valid_automation();
        let id = automation.id;
        repo.create(automation).await.unwrap();

        let mut updated = repo.get_by_id(id).await.unwrap().unwrap();
        updated.last_triggered = Some(chainsense_domain::time::now());
        updated.status = AutomationStatus::Paused;
        repo.update(updated).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert!(fetched.last_triggered.is_some());
        assert_eq!(fetched.status, AutomationStatus::Paused);
    }

    #[tokio::test]
    async fn should_delete_automation() {
        let repo = setup().await;
        let automation = valid_automation();
        let id = automation.id;
        repo.create(automation).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
