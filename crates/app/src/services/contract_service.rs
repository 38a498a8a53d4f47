//! Contract service — use-cases for managing smart contract descriptors.

use chainsense_domain::contract::{ContractStatus, SmartContract};
use chainsense_domain::error::{ChainSenseError, NotFoundError};
use chainsense_domain::id::ContractId;

use crate::ports::ContractRepository;

/// Application service for contract descriptor CRUD and status transitions.
pub struct ContractService<R> {
    repo: R,
}

impl<R: ContractRepository> ContractService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a contract descriptor after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, contract), fields(contract_name = %contract.name))]
    pub async fn register_contract(
        &self,
        contract: SmartContract,
    ) -> Result<SmartContract, ChainSenseError> {
        contract.validate()?;
        self.repo.create(contract).await
    }

    /// Look up a contract by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when no contract with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_contract(&self, id: ContractId) -> Result<SmartContract, ChainSenseError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Contract",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all contract descriptors.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_contracts(&self) -> Result<Vec<SmartContract>, ChainSenseError> {
        self.repo.get_all().await
    }

    /// Get all contracts automations may target.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_active(&self) -> Result<Vec<SmartContract>, ChainSenseError> {
        self.repo.get_active().await
    }

    /// Allow automations to target the contract.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when the contract does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn activate_contract(&self, id: ContractId) -> Result<SmartContract, ChainSenseError> {
        self.set_status(id, ContractStatus::Active).await
    }

    /// Stop automations from targeting the contract.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::NotFound`] when the contract does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_contract(
        &self,
        id: ContractId,
    ) -> Result<SmartContract, ChainSenseError> {
        self.set_status(id, ContractStatus::Inactive).await
    }

    async fn set_status(
        &self,
        id: ContractId,
        status: ContractStatus,
    ) -> Result<SmartContract, ChainSenseError> {
        let mut contract = self.get_contract(id).await?;
        contract.status = status;
        self.repo.update(contract).await
    }

    /// Delete a contract descriptor by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_contract(&self, id: ContractId) -> Result<(), ChainSenseError> {
        self.repo.delete(id).await
    }
}
