//! `SQLite` implementation of [`ContractRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use chainsense_app::ports::ContractRepository;
use chainsense_domain::contract::{ContractStatus, SmartContract};
use chainsense_domain::error::ChainSenseError;
use chainsense_domain::id::ContractId;

use crate::error::StorageError;

struct Wrapper(SmartContract);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<SmartContract> {
        value.map(|w| w.0)
    }
}

fn decode_err(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

fn status_from_str(raw: &str) -> Result<ContractStatus, sqlx::Error> {
    match raw {
        "active" => Ok(ContractStatus::Active),
        "inactive" => Ok(ContractStatus::Inactive),
        other => Err(sqlx::Error::Decode(
            format!("unknown contract status: {other}").into(),
        )),
    }
}

fn status_as_str(status: ContractStatus) -> &'static str {
    match status {
        ContractStatus::Active => "active",
        ContractStatus::Inactive => "inactive",
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let network: String = row.try_get("network")?;
        let address: String = row.try_get("address")?;
        let methods_json: String = row.try_get("methods")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;

        let id = ContractId::from_str(&id).map_err(decode_err)?;
        let methods: Vec<String> = serde_json::from_str(&methods_json).map_err(decode_err)?;
        let status = status_from_str(&status)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.to_utc())
            .map_err(decode_err)?;

        Ok(Self(SmartContract {
            id,
            name,
            network,
            address,
            methods,
            status,
            created_at,
        }))
    }
}

/// `SQLite`-backed contract descriptor repository.
pub struct SqliteContractRepository {
    pool: SqlitePool,
}

impl SqliteContractRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ContractRepository for SqliteContractRepository {
    async fn create(&self, contract: SmartContract) -> Result<SmartContract, ChainSenseError> {
        let methods_json = serde_json::to_string(&contract.methods).map_err(StorageError::from)?;

        sqlx::query(
                "INSERT INTO contracts (id, name, network, address, methods, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(contract.id.to_string())
            .bind(&contract.name)
            .bind(&contract.network)
            .bind(&contract.address)
            .bind(&methods_json)
            .bind(status_as_str(contract.status))
            .bind(contract.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(contract)
    }

    async fn get_by_id(&self, id: ContractId) -> Result<Option<SmartContract>, ChainSenseError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM contracts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<SmartContract>, ChainSenseError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM contracts ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_active(&self) -> Result<Vec<SmartContract>, ChainSenseError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM contracts WHERE status = 'active' ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, contract: SmartContract) -> Result<SmartContract, ChainSenseError> {
        let methods_json = serde_json::to_string(&contract.methods).map_err(StorageError::from)?;

        sqlx::query(
                "UPDATE contracts SET name = ?, network = ?, address = ?, methods = ?, status = ?, created_at = ? WHERE id = ?",
            )
            .bind(&contract.name)
            .bind(&contract.network)
            .bind(&contract.address)
            .bind(&methods_json)
            .bind(status_as_str(contract.status))
            .bind(contract.created_at.to_rfc3339())
            .bind(contract.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(contract)
    }

    async fn delete(&self, id: ContractId) -> Result<(), ChainSenseError> {
        sqlx::query("DELETE FROM contracts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
