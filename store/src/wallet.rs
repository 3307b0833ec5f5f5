//! Wallet config storage.

use gate_recovery::WalletConfig;
use gate_types::RecordAddress;

use crate::StoreError;

/// Keyed storage of [`WalletConfig`] records.
///
/// Each record is exclusively owned by its address. All mutation goes through
/// [`WalletStore::update_wallet`], which implementations must run as one
/// serializable step per record: concurrent updates to the same address are
/// totally ordered, and readers never observe a half-applied update.
pub trait WalletStore {
    /// Load the record at `address`, if any.
    fn get_wallet(&self, address: &RecordAddress) -> Result<Option<WalletConfig>, StoreError>;

    /// Create the record at `address`. Fails with [`StoreError::Duplicate`]
    /// if one already exists; the existing record is left untouched.
    fn insert_wallet(&self, address: &RecordAddress, wallet: &WalletConfig) -> Result<(), StoreError>;

    /// Load the record at `address`, apply `mutate`, and persist the result
    /// only if `mutate` returns `Ok`. On `Err` nothing is written.
    ///
    /// A missing record yields `StoreError::NotFound` converted into `E`.
    fn update_wallet<T, E, F>(&self, address: &RecordAddress, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut WalletConfig) -> Result<T, E>,
        E: From<StoreError>;

    fn wallet_exists(&self, address: &RecordAddress) -> Result<bool, StoreError> {
        Ok(self.get_wallet(address)?.is_some())
    }

    fn wallet_count(&self) -> Result<u64, StoreError>;
}
