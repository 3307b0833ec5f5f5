//! LMDB implementation of WalletStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use gate_recovery::WalletConfig;
use gate_store::{StoreError, WalletStore};
use gate_types::RecordAddress;

use crate::LmdbError;

/// Wallet configs keyed by their 32-byte record address, bincode-encoded.
pub struct LmdbWalletStore {
    pub(crate) env: Arc<Env>,
    pub(crate) wallets_db: Database<Bytes, Bytes>,
}

pub(crate) fn decode_wallet(bytes: &[u8]) -> Result<WalletConfig, LmdbError> {
    bincode::deserialize(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))
}

fn encode_wallet(wallet: &WalletConfig) -> Result<Vec<u8>, LmdbError> {
    bincode::serialize(wallet).map_err(|e| LmdbError::Serialization(e.to_string()))
}

fn backend(e: heed::Error) -> StoreError {
    LmdbError::from(e).into()
}

impl WalletStore for LmdbWalletStore {
    fn get_wallet(&self, address: &RecordAddress) -> Result<Option<WalletConfig>, StoreError> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        match self
            .wallets_db
            .get(&rtxn, address.as_bytes().as_slice())
            .map_err(backend)?
        {
            Some(bytes) => Ok(Some(decode_wallet(bytes)?)),
            None => Ok(None),
        }
    }

    fn insert_wallet(&self, address: &RecordAddress, wallet: &WalletConfig) -> Result<(), StoreError> {
        let key = address.as_bytes().as_slice();
        let encoded = encode_wallet(wallet)?;

        let mut wtxn = self.env.write_txn().map_err(backend)?;
        if self.wallets_db.get(&wtxn, key).map_err(backend)?.is_some() {
            return Err(StoreError::Duplicate(address.to_string()));
        }
        self.wallets_db.put(&mut wtxn, key, &encoded).map_err(backend)?;
        wtxn.commit().map_err(backend)?;
        Ok(())
    }

    fn update_wallet<T, E, F>(&self, address: &RecordAddress, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut WalletConfig) -> Result<T, E>,
        E: From<StoreError>,
    {
        let key = address.as_bytes().as_slice();

        // Dropping `wtxn` without commit aborts the transaction.
        let mut wtxn = self.env.write_txn().map_err(backend)?;
        let mut wallet = match self.wallets_db.get(&wtxn, key).map_err(backend)? {
            Some(bytes) => decode_wallet(bytes).map_err(StoreError::from)?,
            None => return Err(StoreError::NotFound(address.to_string()).into()),
        };

        let out = mutate(&mut wallet)?;

        let encoded = encode_wallet(&wallet).map_err(StoreError::from)?;
        self.wallets_db.put(&mut wtxn, key, &encoded).map_err(backend)?;
        wtxn.commit().map_err(backend)?;
        Ok(out)
    }

    fn wallet_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        Ok(self.wallets_db.len(&rtxn).map_err(backend)?)
    }
}
