//! The vault proxy interface.
//!
//! The vault is an asset-holding account managed outside this crate. The core
//! only decides who may act through it (the current owner) and hands the
//! instructions to a host-provided [`VaultExecutor`].

use gate_types::{Identity, RecordAddress};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque reference to the vault bound to one wallet config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultRef(RecordAddress);

impl VaultRef {
    pub fn new(address: RecordAddress) -> Self {
        Self(address)
    }

    pub fn address(&self) -> &RecordAddress {
        &self.0
    }
}

/// An account touched by a [`VaultInstruction`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultAccountMeta {
    pub key: Identity,
    /// The instruction requires this account's signature.
    pub is_signer: bool,
    /// The instruction may mutate this account.
    pub is_writable: bool,
}

/// An instruction executed with the vault's authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultInstruction {
    /// Program that interprets `data`.
    pub program: Identity,
    pub accounts: Vec<VaultAccountMeta>,
    /// Opaque payload for `program`.
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("no instructions to execute")]
    Empty,

    #[error("vault executor rejected the instructions: {0}")]
    Rejected(String),
}

/// Executes instructions on behalf of a vault. Implemented by the hosting
/// platform; called only after the core has authorized the caller.
pub trait VaultExecutor {
    fn execute(&self, vault: &VaultRef, instructions: &[VaultInstruction]) -> Result<(), VaultError>;
}
