//! Nullable vault executor — records what it was asked to run.

use gate_recovery::{VaultError, VaultExecutor, VaultInstruction, VaultRef};
use std::sync::Mutex;

/// A vault executor that records every batch instead of executing it.
#[derive(Default)]
pub struct NullVaultExecutor {
    executed: Mutex<Vec<(VaultRef, Vec<VaultInstruction>)>>,
    reject_with: Option<String>,
}

impl NullVaultExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An executor that rejects every batch with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            reject_with: Some(reason.into()),
        }
    }

    /// Batches executed so far, oldest first.
    pub fn executed(&self) -> Vec<(VaultRef, Vec<VaultInstruction>)> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl VaultExecutor for NullVaultExecutor {
    fn execute(&self, vault: &VaultRef, instructions: &[VaultInstruction]) -> Result<(), VaultError> {
        if let Some(reason) = &self.reject_with {
            return Err(VaultError::Rejected(reason.clone()));
        }
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((*vault, instructions.to_vec()));
        Ok(())
    }
}
