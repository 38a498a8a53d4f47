//! `SQLite` implementation of [`DeviceRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use chainsense_app::ports::DeviceRepository;
use chainsense_domain::device::{Device, DeviceStatus};
use chainsense_domain::error::ChainSenseError;
use chainsense_domain::id::DeviceId;

use crate::error::StorageError;

struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

fn decode_err(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

fn status_from_str(raw: &str) -> Result<DeviceStatus, sqlx::Error> {
    match raw {
        "online" => Ok(DeviceStatus::Online),
        "offline" => Ok(DeviceStatus::Offline),
        other => Err(sqlx::Error::Decode(
            format!("unknown device status: {other}").into(),
        )),
    }
}

fn status_as_str(status: DeviceStatus) -> &'static str {
    match status {
        DeviceStatus::Online => "online",
        DeviceStatus::Offline => "offline",
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let model: Option<String> = row.try_get("model")?;
        let sensor_fields_json: String = row.try_get("sensor_fields")?;
        let status: String = row.try_get("status")?;
        let last_seen: Option<String> = row.try_get("last_seen")?;

        let id = DeviceId::from_str(&id).map_err(decode_err)?;
        let sensor_fields: Vec<String> =
            serde_json::from_str(&sensor_fields_json).map_err(decode_err)?;
        let status = status_from_str(&status)?;
        let last_seen = last_seen
            .map(|s| {
                chrono::DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.to_utc())
                    .map_err(decode_err)
            })
            .transpose()?;

        Ok(Self(Device {
            id,
            name,
            model,
            sensor_fields,
            status,
            last_seen,
        }))
    }
}

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device, ChainSenseError> {
        let sensor_fields_json =
            serde_json::to_string(&device.sensor_fields).map_err(StorageError::from)?;
        let last_seen = device.last_seen.map(|ts| ts.to_rfc3339());

        sqlx::query(
                "INSERT INTO devices (id, name, model, sensor_fields, status, last_seen) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(device.id.to_string())
            .bind(&device.name)
            .bind(&device.model)
            .bind(&sensor_fields_json)
            .bind(status_as_str(device.status))
            .bind(&last_seen)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, ChainSenseError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM devices WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Device>, ChainSenseError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM devices ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, device: Device) -> Result<Device, ChainSenseError> {
        let sensor_fields_json =
            serde_json::to_string(&device.sensor_fields).map_err(StorageError::from)?;
        let last_seen = device.last_seen.map(|ts| ts.to_rfc3339());

        sqlx::query(
                "UPDATE devices SET name = ?, model = ?, sensor_fields = ?, status = ?, last_seen = ? WHERE id = ?",
            )
            .bind(&device.name)
            .bind(&device.model)
            .bind(&sensor_fields_json)
            .bind(status_as_str(device.status))
            .bind(&last_seen)
            .bind(device.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(device)
    }

    async fn delete(&self, id: DeviceId) -> Result<(), ChainSenseError> {
        sqlx::query("DELETE FROM devices WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
