//! Nullable store — thread-safe in-memory wallet storage for testing.

use gate_recovery::WalletConfig;
use gate_store::{StoreError, WalletStore};
use gate_types::RecordAddress;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// An in-memory wallet store. A single mutex serializes every access.
pub struct NullWalletStore {
    wallets: Mutex<HashMap<RecordAddress, WalletConfig>>,
}

impl NullWalletStore {
    pub fn new() -> Self {
        Self {
            wallets: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RecordAddress, WalletConfig>> {
        // A panicking test thread must not wedge the others.
        self.wallets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NullWalletStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletStore for NullWalletStore {
    fn get_wallet(&self, address: &RecordAddress) -> Result<Option<WalletConfig>, StoreError> {
        Ok(self.lock().get(address).cloned())
    }

    fn insert_wallet(&self, address: &RecordAddress, wallet: &WalletConfig) -> Result<(), StoreError> {
        let mut wallets = self.lock();
        if wallets.contains_key(address) {
            return Err(StoreError::Duplicate(address.to_string()));
        }
        wallets.insert(*address, wallet.clone());
        Ok(())
    }

    fn update_wallet<T, E, F>(&self, address: &RecordAddress, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut WalletConfig) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut wallets = self.lock();
        let slot = wallets
            .get_mut(address)
            .ok_or_else(|| StoreError::NotFound(address.to_string()))?;

        // Mutate a copy so a rejected update leaves the stored record intact.
        let mut working = slot.clone();
        let out = mutate(&mut working)?;
        *slot = working;
        Ok(out)
    }

    fn wallet_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock().len() as u64)
    }
}
