//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::wallet::LmdbWalletStore;
use crate::LmdbError;

/// Current on-disk layout version.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

pub(crate) const WALLETS_DB: &str = "wallets";
pub(crate) const META_DB: &str = "meta";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) wallets_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// A fresh environment is stamped with [`SCHEMA_VERSION`]; an existing
    /// one must already carry it.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process per path, and the
        // memory map is never handed out beyond heed's own transaction guards.
        let env = unsafe { EnvOpenOptions::new().map_size(map_size).max_dbs(4).open(path)? };

        let mut wtxn = env.write_txn()?;
        let wallets_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(WALLETS_DB))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(META_DB))?;

        let found = match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("schema_version has unexpected byte length".into())
                })?;
                Some(u32::from_le_bytes(arr))
            }
            None => None,
        };
        match found {
            Some(version) if version != SCHEMA_VERSION => {
                return Err(LmdbError::SchemaVersion {
                    found: version,
                    expected: SCHEMA_VERSION,
                });
            }
            Some(_) => {}
            None => {
                meta_db.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_le_bytes())?;
                tracing::info!(path = %path.display(), version = SCHEMA_VERSION, "initialized wallet database");
            }
        }
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            wallets_db,
            meta_db,
        })
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }

    /// Stored schema version (zero if unset).
    pub fn schema_version(&self) -> Result<u32, LmdbError> {
        let rtxn = self.env.read_txn()?;
        match self.meta_db.get(&rtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("schema_version has unexpected byte length".into())
                })?;
                Ok(u32::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }

    /// A wallet store sharing this environment.
    pub fn wallet_store(&self) -> LmdbWalletStore {
        LmdbWalletStore {
            env: Arc::clone(&self.env),
            wallets_db: self.wallets_db,
        }
    }
}
