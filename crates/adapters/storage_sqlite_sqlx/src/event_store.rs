//! `SQLite` implementation of [`EventStore`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use chainsense_app::ports::EventStore;
use chainsense_domain::error::ChainSenseError;
use chainsense_domain::event::{Event, EventType};
use chainsense_domain::id::{AutomationId, DeviceId, EventId};

use crate::error::StorageError;

struct Wrapper(Event);

fn decode_err(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

fn event_type_from_str(raw: &str) -> Result<EventType, sqlx::Error> {
    match raw {
        "device_registered" => Ok(EventType::DeviceRegistered),
        "reading_received" => Ok(EventType::ReadingReceived),
        "automation_triggered" => Ok(EventType::AutomationTriggered),
        "contract_invoked" => Ok(EventType::ContractInvoked),
        other => Err(sqlx::Error::Decode(
            format!("unknown event type: {other}").into(),
        )),
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let event_type: String = row.try_get("event_type")?;
        let device_id: Option<String> = row.try_get("device_id")?;
        let automation_id: Option<String> = row.try_get("automation_id")?;
        let data_json: String = row.try_get("data")?;
        let timestamp: String = row.try_get("timestamp")?;

        let id = EventId::from_str(&id).map_err(decode_err)?;
        let event_type = event_type_from_str(&event_type)?;
        let device_id = device_id
            .map(|s| DeviceId::from_str(&s).map_err(decode_err))
            .transpose()?;
        let automation_id = automation_id
            .map(|s| AutomationId::from_str(&s).map_err(decode_err))
            .transpose()?;
        let data: serde_json::Value = serde_json::from_str(&data_json).map_err(decode_err)?;
        let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp)
            .map(|dt| dt.to_utc())
            .map_err(decode_err)?;

        Ok(Self(Event {
            id,
            event_type,
            device_id,
            automation_id,
            data,
            timestamp,
        }))
    }
}

/// `SQLite`-backed append-only event store.
pub struct SqliteEventStore {
    pool: SqlitePool,
}

impl SqliteEventStore {
    /// Create a new store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventStore for SqliteEventStore {
    async fn store(&self, event: Event) -> Result<Event, ChainSenseError> {
        let data_json = serde_json::to_string(&event.data).map_err(StorageError::from)?;

        sqlx::query(
                "INSERT INTO events (id, event_type, device_id, automation_id, data, timestamp) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(event.id.to_string())
            .bind(event.event_type.to_string())
            .bind(event.device_id.map(|id| id.to_string()))
            .bind(event.automation_id.map(|id| id.to_string()))
            .bind(&data_json)
            .bind(event.timestamp.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(event)
    }

    async fn get_recent(&self, limit: usize) -> Result<Vec<Event>, ChainSenseError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM events ORDER BY timestamp DESC LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_automation(
        &self,
        automation_id: AutomationId,
        limit: usize,
    ) -> Result<Vec<Event>, ChainSenseError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM events WHERE automation_id = ? ORDER BY timestamp DESC LIMIT ?",
        )
        .bind(automation_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteEventStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteEventStore::new(db.pool().clone())
    }

    #[tokio::test]
    async fn should_store_and_retrieve_event() {
        let store = setup().await;
        let event = Event::new(
            EventType::ReadingReceived,
            serde_json::json!({"field": "temperature", "value": 21.5}),
        )
        .with_device(DeviceId::new());
        let id = event.id;

        store.store(event).await.unwrap();

        let recent = store.get_recent(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, id);
        assert_eq!(recent[0].event_type, EventType::ReadingReceived);
    }

    #[tokio::test]
    async fn should_cap_recent_events_at_limit() {
        let store = setup().await;
        for _ in 0..5 {
            store
                .store(Event::new(EventType::ReadingReceived, serde_json::json!({})))
                .await
                .unwrap();
        }

        let recent = store.get_recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
    }

    #[tokio::test]
    async fn should_find_events_for_one_automation_only() {
        let store = setup().await;
        let automation_id = AutomationId::new();

        store
            .store(
                Event::new(EventType::AutomationTriggered, serde_json::json!({}))
                    .with_automation(automation_id),
            )
            .await
            .unwrap();
        store
            .store(
                Event::new(EventType::AutomationTriggered, serde_json::json!({}))
                    .with_automation(AutomationId::new()),
            )
            .await
            .unwrap();

        let found = store.find_by_automation(automation_id, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].automation_id, Some(automation_id));
    }
}
