//! Smart contract — an on-chain program the platform can drive.
//!
//! The platform stores a descriptor of each deployed contract: where it
//! lives, which methods it exposes, and whether automations may target it.

use serde::{Deserialize, Serialize};

use crate::error::{ChainSenseError, ValidationError};
use crate::id::ContractId;
use crate::time::Timestamp;

/// Whether a contract may be targeted by automations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Inactive => f.write_str("inactive"),
        }
    }
}

/// Descriptor of a deployed smart contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartContract {
    pub id: ContractId,
    pub name: String,
    /// Network the contract is deployed on (e.g. `"sepolia"`).
    pub network: String,
    /// On-chain address, hex-encoded.
    pub address: String,
    /// Callable method names automations may select from.
    pub methods: Vec<String>,
    pub status: ContractStatus,
    pub created_at: Timestamp,
}

impl SmartContract {
    /// Create a builder for constructing a [`SmartContract`].
    #[must_use]
    pub fn builder() -> SmartContractBuilder {
        SmartContractBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `address` is empty ([`ValidationError::EmptyAddress`])
    /// - `methods` is empty ([`ValidationError::NoMethods`])
    pub fn validate(&self) -> Result<(), ChainSenseError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.address.is_empty() {
            return Err(ValidationError::EmptyAddress.into());
        }
        if self.methods.is_empty() {
            return Err(ValidationError::NoMethods.into());
        }
        Ok(())
    }

    /// Whether the contract exposes the given method.
    #[must_use]
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    /// Whether automations may currently target this contract.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Active
    }
}

/// Step-by-step builder for [`SmartContract`].
#[derive(Debug, Default)]
pub struct SmartContractBuilder {
    id: Option<ContractId>,
    name: Option<String>,
    network: Option<String>,
    address: Option<String>,
    methods: Vec<String>,
    status: Option<ContractStatus>,
    created_at: Option<Timestamp>,
}

impl SmartContractBuilder {
    #[must_use]
    pub fn id(mut self, id: ContractId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: ContractStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return a [`SmartContract`].
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] if required fields are
    /// missing or empty.
    pub fn build(self) -> Result<SmartContract, ChainSenseError> {
        let contract = SmartContract {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            network: self.network.unwrap_or_else(|| "mainnet".to_string()),
            address: self.address.unwrap_or_default(),
            methods: self.methods,
            status: self.status.unwrap_or(ContractStatus::Active),
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        };
        contract.validate()?;
        Ok(contract)
    }
}
